//! City-specific cultural adaptation of generated copy.

pub mod contexts;
pub mod engine;
pub mod handlers;

pub use engine::Localizer;
