use anyhow::Result;

use crate::config::BoardConfig;

/// Display board statistics in the terminal.
pub fn stats(config: &BoardConfig, json: bool) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let response = crate::board::stats::board_stats(&conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Board Statistics");
    println!("{}", "=".repeat(40));
    println!("  Ideas:               {}", response.ideas);
    println!("  Comments:            {}", response.comments);
    println!("  Likes:               {}", response.likes);
    println!();
    println!("  Orphaned comments:   {}", response.orphaned_comments);
    println!("  Orphaned likes:      {}", response.orphaned_likes);
    println!("  Counter mismatches:  {}", response.counter_mismatches.len());

    Ok(())
}
