// src/services/mod.rs

pub mod answers;
pub mod elements;
pub mod grading;
pub mod leaderboard;
pub mod users;
