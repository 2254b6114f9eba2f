mod recaptcha;

pub use recaptcha::*;
