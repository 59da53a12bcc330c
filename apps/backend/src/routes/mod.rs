pub mod cards;
pub mod score;
pub mod sessions;
