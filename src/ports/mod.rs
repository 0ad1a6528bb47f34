//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod image_generator;
pub mod media_store;
pub mod story_generator;

pub use image_generator::{ImageGenerator, ImageRequest};
pub use media_store::{MediaStore, UploadRequest};
pub use story_generator::{StoryGenerator, StoryRequest};
