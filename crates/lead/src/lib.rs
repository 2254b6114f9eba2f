mod banner;
mod controller;
mod errors;
mod fields;
mod provider;
mod submission;

pub use banner::*;
pub use controller::*;
pub use errors::*;
pub use fields::*;
pub use provider::*;
pub use submission::*;
