//! Command implementation modules

pub mod sort;
pub mod words;

pub use sort::run_sort_command;
pub use words::run_words_command;
