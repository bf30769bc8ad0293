//! Transport layer: endpoint routing and wire-format details.

mod endpoint;
mod get_dlr_response;
mod response;
mod send_sms;

pub use endpoint::{
    ApiHosts, DEFAULT_BACKUP_URL, DEFAULT_PRIMARY_URL, GET_DLR_RESPONSE_PATH, SEND_SMS_PATH,
    api_url,
};
pub use get_dlr_response::encode_get_status_query;
pub use response::{interpret_response, parse_response};
pub use send_sms::encode_send_sms_query;
