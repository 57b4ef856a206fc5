//! # sortwords
//!
//! Two small pipelines behind one CLI.
//!
//! ## Usage
//!
//! ```bash
//! sortwords sort <SOURCE> <OUTPUT> [--on-conflict overwrite|skip|rename]
//! sortwords words [--url URL | --input FILE] [-n 10]
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup and fatal error reporting
//! - `cli` - Argument parsing and command handlers
//! - `config` - TOML and environment configuration
//! - `error` - The crate error type
//! - `sort` - Copy a directory tree into per-extension folders
//! - `words` - Word frequencies via an in-process map/shuffle/reduce
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod sort;
pub mod words;

pub use error::{Error, Result};
