mod emailjs;
mod service;
pub(crate) mod template;

pub use emailjs::*;
pub use service::*;
