pub mod error;
pub mod output;

pub use error::PathShiftError;
pub use output::{OutputFormat, OutputWriter};
