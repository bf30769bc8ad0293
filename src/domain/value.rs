use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Messente API username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query parameter name used by Messente (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Messente API password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by Messente (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// UTF-8 message text (`text`).
///
/// Sent verbatim; encoding and length limits are enforced by the API.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by Messente (`text`).
    pub const FIELD: &'static str = "text";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Receiver's phone number as sent to Messente (`to`), including the country code.
///
/// The value is not validated or normalized. For E.164 normalization, parse into
/// [`PhoneNumber`] and convert it into [`Recipient`].
pub struct Recipient(String);

impl Recipient {
    /// Query parameter name used by Messente (`to`).
    pub const FIELD: &'static str = "to";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Value exactly as it will be sent.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Recipient {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<PhoneNumber> for Recipient {
    /// Convert an already-parsed phone number to its E.164 form.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query parameter name used by Messente (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name (`from`).
///
/// Passed through verbatim, including the empty string. The name must be
/// activated on the Messente account, otherwise the API answers `ERROR 111`.
pub struct SenderName(String);

impl SenderName {
    /// Query parameter name used by Messente (`from`).
    pub const FIELD: &'static str = "from";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SenderName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SenderName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unique message id returned by `send_sms`, used to query the delivery report.
///
/// Opaque; preserved exactly as the API returned it.
pub struct MessageId(String);

impl MessageId {
    /// Query parameter name used by `get_dlr_response` (`sms_unique_id`).
    pub const FIELD: &'static str = "sms_unique_id";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery status word returned by `get_dlr_response`.
///
/// This value is preserved as-is even when it is not one of the documented statuses.
pub struct DeliveryStatus(String);

impl DeliveryStatus {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Status word exactly as returned by Messente.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this status to a documented variant, if one matches.
    pub fn known(&self) -> Option<KnownDeliveryStatus> {
        KnownDeliveryStatus::from_status(&self.0)
    }

    /// Returns `true` when the handset confirmed delivery.
    pub fn is_delivered(&self) -> bool {
        self.known() == Some(KnownDeliveryStatus::Delivered)
    }

    /// Returns `true` once the status will no longer change.
    pub fn is_final(&self) -> bool {
        matches!(
            self.known(),
            Some(KnownDeliveryStatus::Delivered | KnownDeliveryStatus::Failed)
        )
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Documented delivery statuses.
pub enum KnownDeliveryStatus {
    Sent,
    Failed,
    Delivered,
}

impl KnownDeliveryStatus {
    /// Convert a raw status word into a known variant.
    pub fn from_status(status: &str) -> Option<Self> {
        Some(match status {
            "SENT" => Self::Sent,
            "FAILED" => Self::Failed,
            "DELIVERED" => Self::Delivered,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
            Self::Delivered => "DELIVERED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_newtypes_trim_or_validate() {
        let username = Username::new("  user ").unwrap();
        assert_eq!(username.as_str(), "user");
        assert!(Username::new("  ").is_err());

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());
    }

    #[test]
    fn password_debug_hides_value() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn request_values_are_kept_verbatim() {
        assert_eq!(MessageText::new("  hi ").as_str(), "  hi ");
        assert_eq!(Recipient::new(" +15550001111").raw(), " +15550001111");
        assert_eq!(SenderName::new("").as_str(), "");
        assert_eq!(MessageId::from("abc 123").as_str(), "abc 123");
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+37251234567").unwrap();
        let p2 = PhoneNumber::parse(None, "+372 5123 4567").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+37251234567");

        let recipient: Recipient = p2.into();
        assert_eq!(recipient.raw(), "+37251234567");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(matches!(
            PhoneNumber::parse(None, "  "),
            Err(ValidationError::Empty { field: "to" })
        ));
    }

    #[test]
    fn phone_number_uses_default_region() {
        let pn = PhoneNumber::parse(Some(country::Id::EE), " 51234567 ").unwrap();
        assert_eq!(pn.raw(), "51234567");
        assert_eq!(pn.e164(), "+37251234567");
    }

    #[test]
    fn delivery_status_known_mapping() {
        assert_eq!(
            DeliveryStatus::new("DELIVERED").known(),
            Some(KnownDeliveryStatus::Delivered)
        );
        assert_eq!(
            DeliveryStatus::new("SENT").known(),
            Some(KnownDeliveryStatus::Sent)
        );
        assert!(DeliveryStatus::new("FAILED").is_final());
        assert!(!DeliveryStatus::new("SENT").is_final());

        let unknown = DeliveryStatus::new("QUEUED");
        assert_eq!(unknown.known(), None);
        assert_eq!(unknown.as_str(), "QUEUED");
        assert!(!unknown.is_delivered());
    }
}
