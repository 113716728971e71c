//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;
pub mod shell;

pub use config::Config;
pub use context::EditorContext;
pub use shell::Shell;
