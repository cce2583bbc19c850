// src/models/mod.rs

pub mod answer;
pub mod element;
pub mod score;
pub mod user;

pub use answer::Answer;
pub use element::Element;
pub use score::Score;
pub use user::User;
