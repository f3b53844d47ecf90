pub mod sheet_reader;

pub use sheet_reader::{ReadOptions, SheetReader};
