use std::fmt;

/// Description used for codes that are not in the known table.
pub const UNKNOWN_ERROR_DESCRIPTION: &str = "Unknown Messente API error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which of the two rejection namespaces a code belongs to.
///
/// `ERROR` codes are request-level problems that will not go away on their own.
/// `FAILURE` codes are transient and can be retried.
pub enum ErrorFamily {
    Error,
    Failure,
}

impl ErrorFamily {
    /// Leading token used on the wire.
    pub fn token(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Failure => "FAILURE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Composite code returned by Messente, e.g. `"ERROR 101"` or `"FAILURE 209"`.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ApiErrorCode(String);

impl ApiErrorCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code exactly as returned by Messente.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(&self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(&self.0)
    }

    /// Human-readable description, falling back to [`UNKNOWN_ERROR_DESCRIPTION`].
    pub fn description(&self) -> &'static str {
        self.known()
            .map_or(UNKNOWN_ERROR_DESCRIPTION, KnownErrorCode::description)
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Error codes documented by Messente.
pub enum KnownErrorCode {
    InvalidCredentials,
    InvalidParameters,
    InvalidIpAddress,
    UnknownMessageId,
    InvalidSenderName,
    NoDeliveryReportYet,
    ServerFailure,
}

const KNOWN_ERROR_CODES: [(&str, KnownErrorCode); 7] = [
    ("ERROR 101", KnownErrorCode::InvalidCredentials),
    ("ERROR 102", KnownErrorCode::InvalidParameters),
    ("ERROR 103", KnownErrorCode::InvalidIpAddress),
    ("ERROR 107", KnownErrorCode::UnknownMessageId),
    ("ERROR 111", KnownErrorCode::InvalidSenderName),
    ("FAILURE 102", KnownErrorCode::NoDeliveryReportYet),
    ("FAILURE 209", KnownErrorCode::ServerFailure),
];

impl KnownErrorCode {
    /// Look up a composite code. Matching is exact.
    pub fn from_code(code: &str) -> Option<Self> {
        KNOWN_ERROR_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
    }

    /// Composite code as it appears on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "ERROR 101",
            Self::InvalidParameters => "ERROR 102",
            Self::InvalidIpAddress => "ERROR 103",
            Self::UnknownMessageId => "ERROR 107",
            Self::InvalidSenderName => "ERROR 111",
            Self::NoDeliveryReportYet => "FAILURE 102",
            Self::ServerFailure => "FAILURE 209",
        }
    }

    pub fn family(self) -> ErrorFamily {
        match self {
            Self::NoDeliveryReportYet | Self::ServerFailure => ErrorFamily::Failure,
            _ => ErrorFamily::Error,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidCredentials => {
                "Access is restricted, wrong credentials. Check the username and password values."
            }
            Self::InvalidParameters => {
                "Parameters are wrong or missing. Check that all the required parameters are present."
            }
            Self::InvalidIpAddress => {
                "Invalid IP address. The IP address you made the request from, is not in the whitelist."
            }
            Self::UnknownMessageId => "Could not find message with this message ID.",
            Self::InvalidSenderName => {
                "Sender parameter is invalid. You have not activated this sender name."
            }
            Self::NoDeliveryReportYet => "No delivery report yet, try again in 5 seconds.",
            Self::ServerFailure => {
                "Server failure, try again after a few seconds or try the backup server."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Well-formed rejection returned by Messente.
pub struct ApiError {
    family: ErrorFamily,
    code: ApiErrorCode,
    description: &'static str,
}

impl ApiError {
    /// Classify a composite code.
    pub fn new(family: ErrorFamily, code: ApiErrorCode) -> Self {
        let description = code.description();
        Self {
            family,
            code,
            description,
        }
    }

    pub fn family(&self) -> ErrorFamily {
        self.family
    }

    pub fn code(&self) -> &ApiErrorCode {
        &self.code
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn known(&self) -> Option<KnownErrorCode> {
        self.code.known()
    }

    /// `FAILURE` codes are transient; `ERROR` codes are not.
    pub fn is_retryable(&self) -> bool {
        self.family == ErrorFamily::Failure
    }

    /// Returns `true` when the caller should consider switching to the backup API.
    pub fn suggests_backup(&self) -> bool {
        self.known() == Some(KnownErrorCode::ServerFailure)
    }

    /// Returns `true` for credential or IP whitelist rejections.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.known(),
            Some(KnownErrorCode::InvalidCredentials | KnownErrorCode::InvalidIpAddress)
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip_through_table() {
        for (code, kind) in KNOWN_ERROR_CODES {
            assert_eq!(KnownErrorCode::from_code(code), Some(kind));
            assert_eq!(kind.code(), code);
            assert!(code.starts_with(kind.family().token()));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(KnownErrorCode::from_code("ERROR 101 "), None);
        assert_eq!(KnownErrorCode::from_code("error 101"), None);
        assert_eq!(KnownErrorCode::from_code("FAILED 102"), None);
    }

    #[test]
    fn unknown_code_keeps_raw_value_and_generic_description() {
        let err = ApiError::new(ErrorFamily::Error, ApiErrorCode::new("ERROR 999"));
        assert_eq!(err.code().as_str(), "ERROR 999");
        assert_eq!(err.description(), UNKNOWN_ERROR_DESCRIPTION);
        assert_eq!(err.known(), None);
        assert!(!err.is_retryable());
    }

    #[test]
    fn failure_family_is_retryable() {
        let err = ApiError::new(ErrorFamily::Failure, ApiErrorCode::new("FAILURE 209"));
        assert!(err.is_retryable());
        assert!(err.suggests_backup());
        assert_eq!(
            err.to_string(),
            "FAILURE 209: Server failure, try again after a few seconds or try the backup server."
        );

        let err = ApiError::new(ErrorFamily::Failure, ApiErrorCode::new("FAILURE 102"));
        assert!(err.is_retryable());
        assert!(!err.suggests_backup());
    }

    #[test]
    fn auth_errors_are_flagged() {
        let err = ApiError::new(ErrorFamily::Error, ApiErrorCode::new("ERROR 101"));
        assert!(err.is_auth_error());
        assert!(!err.is_retryable());

        let err = ApiError::new(ErrorFamily::Error, ApiErrorCode::new("ERROR 107"));
        assert!(!err.is_auth_error());
    }
}
