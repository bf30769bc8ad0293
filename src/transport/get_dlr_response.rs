use crate::domain::{GetStatus, MessageId};

/// Query parameters for `get_dlr_response`, excluding credentials.
pub fn encode_get_status_query(request: &GetStatus) -> Vec<(String, String)> {
    vec![(
        MessageId::FIELD.to_owned(),
        request.message_id().as_str().to_owned(),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_get_status_query_params() {
        let request = GetStatus::new("abc123");
        assert_eq!(
            encode_get_status_query(&request),
            vec![("sms_unique_id".to_owned(), "abc123".to_owned())]
        );
    }
}
