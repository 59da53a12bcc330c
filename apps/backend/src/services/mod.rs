pub mod catalog;
pub mod levels;
pub mod scoring;
pub mod sessions;
