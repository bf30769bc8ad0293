//! Domain layer: strong types with validation and invariants (no I/O).

mod error_code;
mod request;
mod response;
mod validation;
mod value;

pub use error_code::{
    ApiError, ApiErrorCode, ErrorFamily, KnownErrorCode, UNKNOWN_ERROR_DESCRIPTION,
};
pub use request::{ApiEndpoint, GetStatus, SendSms};
pub use response::{ParsedResponse, ProtocolError, ResponseToken};
pub use validation::ValidationError;
pub use value::{
    DeliveryStatus, KnownDeliveryStatus, MessageId, MessageText, Password, PhoneNumber, Recipient,
    SenderName, Username,
};
