use crate::domain::{MessageText, Recipient, SendSms, SenderName};

/// Query parameters for `send_sms`, excluding credentials.
///
/// `from` is only present when the request carries a sender name.
pub fn encode_send_sms_query(request: &SendSms) -> Vec<(String, String)> {
    let mut params = vec![
        (
            MessageText::FIELD.to_owned(),
            request.text().as_str().to_owned(),
        ),
        (Recipient::FIELD.to_owned(), request.to().raw().to_owned()),
    ];
    if let Some(from) = request.sender() {
        params.push((SenderName::FIELD.to_owned(), from.as_str().to_owned()));
    }
    params
}
