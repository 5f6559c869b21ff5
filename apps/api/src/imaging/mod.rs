//! Campaign imagery: prompt builder, image-service client and the branded
//! template returned when no image can be generated.

pub mod client;
pub mod handlers;
pub mod prompt;

pub use client::{ImageClient, ImageGenerator};
