use url::Url;

use crate::domain::{ApiEndpoint, ValidationError};

pub const DEFAULT_PRIMARY_URL: &str = "https://api2.messente.com";
pub const DEFAULT_BACKUP_URL: &str = "https://api3.messente.com";

pub const SEND_SMS_PATH: &str = "/send_sms/";
pub const GET_DLR_RESPONSE_PATH: &str = "/get_dlr_response/";

/// Base URLs for the primary and backup Messente hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHosts {
    primary: String,
    backup: String,
}

impl ApiHosts {
    pub fn new(primary: &str, backup: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            primary: parse_base("primary", primary)?,
            backup: parse_base("backup", backup)?,
        })
    }

    pub fn base(&self, endpoint: ApiEndpoint) -> &str {
        match endpoint {
            ApiEndpoint::Primary => &self.primary,
            ApiEndpoint::Backup => &self.backup,
        }
    }
}

impl Default for ApiHosts {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_URL.to_owned(),
            backup: DEFAULT_BACKUP_URL.to_owned(),
        }
    }
}

/// Full URL for `path` on the host selected by `endpoint`.
pub fn api_url(hosts: &ApiHosts, endpoint: ApiEndpoint, path: &str) -> String {
    format!("{}{}", hosts.base(endpoint), path)
}

fn parse_base(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let parsed = Url::parse(input.trim()).map_err(|_| ValidationError::InvalidUrl {
        field,
        input: input.to_owned(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl {
            field,
            input: input.to_owned(),
        });
    }
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}
