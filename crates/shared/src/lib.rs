mod error;
pub mod lead;

pub use error::*;
