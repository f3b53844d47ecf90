pub mod record_set;
pub mod target;

pub use record_set::{RecordSet, Row};
pub use target::TargetRecord;
