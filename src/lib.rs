//! Typed Rust client for the Messente SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for endpoint routing and the `<TOKEN> <payload>` response protocol, and a
//! small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use messente::{Credentials, MessenteClient, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), messente::MessenteError> {
//!     let mut client = MessenteClient::new(Credentials::new("user", "secret")?);
//!     let id = client.send(SendSms::new("hello", "+37251234567")).await?;
//!
//!     // Primary host down? Route the next call to the backup one.
//!     client.set_use_backup_api(true);
//!     let status = client.get_status_of(id).await?;
//!     println!("{status}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClientConfig, ConfigError, Credentials, MessenteClient, MessenteClientBuilder, MessenteError,
};
pub use domain::{
    ApiEndpoint, ApiError, ApiErrorCode, DeliveryStatus, ErrorFamily, GetStatus,
    KnownDeliveryStatus, KnownErrorCode, MessageId, MessageText, ParsedResponse, PhoneNumber,
    ProtocolError, Recipient, ResponseToken, SendSms, SenderName, ValidationError,
};
pub use transport::{interpret_response, parse_response};
