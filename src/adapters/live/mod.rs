//! Live adapters that call the real hosted APIs.

pub mod cloudinary;
pub mod gemini;
pub mod replicate;
