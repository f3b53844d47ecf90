pub mod worklist;

pub use worklist::{format_line, Lines, Worklist};
