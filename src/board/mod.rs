pub mod comments;
pub mod ideas;
pub mod likes;
pub mod stats;
pub mod types;
