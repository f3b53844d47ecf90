pub mod args;
pub mod commands;

pub use args::{Cli, Commands, SheetArgs};
pub use commands::run;
