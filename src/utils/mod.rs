pub mod constants;
pub mod coordinates;
pub mod progress;

pub use constants::*;
pub use coordinates::{split_ra_dec, RaDec};
pub use progress::ProgressReporter;
