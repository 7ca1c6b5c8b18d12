//! CLI `doctor` command: run database diagnostics and print a health report.

use anyhow::{Context, Result};

use crate::board::stats::board_stats;
use crate::config::BoardConfig;
use crate::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &BoardConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `ideaboard serve` to create it.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn).context("failed to run health check")?;
    let stats = board_stats(&conn).context("failed to compute board statistics")?;

    println!("Ideas Board Health Report");
    println!("=========================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!();
    println!("Row counts:");
    println!("  Ideas:           {}", report.idea_count);
    println!("  Comments:        {}", report.comment_count);
    println!("  Likes:           {}", report.like_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }

    if stats.orphaned_comments > 0 || stats.orphaned_likes > 0 {
        println!(
            "WARNING: {} comments and {} likes reference deleted ideas.",
            stats.orphaned_comments, stats.orphaned_likes
        );
    }
    if !stats.counter_mismatches.is_empty() {
        println!(
            "WARNING: {} ideas have a like counter that differs from their like rows:",
            stats.counter_mismatches.len()
        );
        for m in &stats.counter_mismatches {
            println!("  idea {:<8} counter {:<6} rows {}", m.id, m.counter, m.actual);
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
