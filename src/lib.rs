//! Ideas board backend: ideas, comments and per-user likes over HTTP.
//!
//! Clients create, list, update and delete short proposals ("ideas"), comment
//! on them, and toggle a per-user like. Everything lives in a single SQLite
//! file with three tables:
//!
//! | Table | Rows | Notes |
//! |-------|------|-------|
//! | `ideas` | title, description, category, `likes` counter | root records |
//! | `comments` | `idea_id`, text | never edited |
//! | `likes` | `idea_id`, `user_id` | unique per (idea, user) |
//!
//! The `likes` column is a cached count of like rows; toggling a like moves
//! both in one transaction. Deleting an idea removes its comments and likes.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`error`]: The `BoardError` type returned by every board operation
//! - [`db`]: SQLite initialization, the shared [`db::Store`] handle, and health checks
//! - [`board`]: Idea, comment and like operations plus board statistics
//! - [`server`]: axum router and HTTP server
//! - [`cli`]: `stats` and `doctor` terminal commands

pub mod board;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
