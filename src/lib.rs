pub mod config;
pub mod error;
pub mod git;
pub mod naming;
pub mod tagger;
pub mod ui;

pub use error::{Result, VertagError};
