//! Formforge command-line interface library.
//!
//! Exposes the CLI definition and command handlers so they can be driven
//! from tests without spawning the binary.

pub mod cli;
pub mod commands;
pub mod render;

pub use cli::{Cli, Commands, OutputFormat};
pub use commands::{run, Outcome};
