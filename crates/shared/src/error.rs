use strum::{AsRefStr, Display};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("challenge provider is not available")]
    ChallengeUnavailable,

    #[error("challenge verification failed")]
    ChallengeFailed,

    #[error("{0}")]
    Delivery(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds as they surface on a form.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    FieldInvalid,
    ChallengeUnavailable,
    ChallengeFailed,
    DeliveryFailed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validate(_) => ErrorKind::FieldInvalid,
            Error::ChallengeUnavailable => ErrorKind::ChallengeUnavailable,
            Error::ChallengeFailed => ErrorKind::ChallengeFailed,
            Error::Delivery(_) => ErrorKind::DeliveryFailed,
        }
    }
}
