//! Storybloom - personalized bilingual children's story generation.
//!
//! The core is an orchestration pipeline: one text-generation call produces
//! a validated five-part English/Chinese story, then an optional concurrent
//! fan-out illustrates every part from a user-supplied reference photo.
//! External services sit behind port traits in [`ports`], with live,
//! recording, and replaying adapters in [`adapters`].

pub mod adapters;
pub mod age;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod prompt;
pub mod server;
pub mod story;
