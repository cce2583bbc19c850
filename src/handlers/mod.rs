// src/handlers/mod.rs

pub mod answers;
pub mod elements;
pub mod leaderboard;
pub mod users;
