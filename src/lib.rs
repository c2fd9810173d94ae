pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod preview;
pub mod reader;
pub mod selector;
