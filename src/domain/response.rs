use crate::domain::error_code::{ApiError, ErrorFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Leading token of a Messente response line.
pub enum ResponseToken {
    Ok,
    Error,
    Failure,
}

impl ResponseToken {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
            Self::Failure => "FAILURE",
        }
    }

    /// Rejection family for `ERROR`/`FAILURE`; `None` for `OK`.
    pub fn error_family(self) -> Option<ErrorFamily> {
        match self {
            Self::Ok => None,
            Self::Error => Some(ErrorFamily::Error),
            Self::Failure => Some(ErrorFamily::Failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A response line that matched `<TOKEN> <payload>`.
pub struct ParsedResponse {
    pub token: ResponseToken,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Failures produced while interpreting a response body.
pub enum ProtocolError {
    /// The body did not match the `<TOKEN> <payload>` line grammar.
    #[error("invalid response received from Messente API: {body}")]
    InvalidResponse { body: String },

    /// Messente answered with an `ERROR` or `FAILURE` code.
    #[error("Messente API error {0}")]
    Api(ApiError),
}
