//! handysheet - demo program for the handysheet spreadsheet builder.
//!
//! The library half holds what the binary needs and what its tests exercise:
//! configuration loading, the scripted demo, and markdown rendering.

pub mod config;
pub mod demo;
pub mod error;
pub mod render;

pub use error::{DemoError, Result};
