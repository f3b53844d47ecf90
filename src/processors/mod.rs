pub mod normalizer;
pub mod selection;

pub use normalizer::normalize;
pub use selection::{select_followup, select_unobserved, split_coordinates, Selection};
