use crate::domain::value::{MessageId, MessageText, Recipient, SenderName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which Messente host a call is routed to.
pub enum ApiEndpoint {
    #[default]
    Primary,
    /// Alternate host for when the primary is unavailable.
    Backup,
}

impl ApiEndpoint {
    pub fn from_use_backup(use_backup: bool) -> Self {
        if use_backup {
            Self::Backup
        } else {
            Self::Primary
        }
    }

    pub fn is_backup(self) -> bool {
        self == Self::Backup
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `send_sms` request.
pub struct SendSms {
    text: MessageText,
    to: Recipient,
    from: Option<SenderName>,
}

impl SendSms {
    /// Send `text` to `to` using the account's default sender name.
    pub fn new(text: impl Into<MessageText>, to: impl Into<Recipient>) -> Self {
        Self {
            text: text.into(),
            to: to.into(),
            from: None,
        }
    }

    /// Use a specific (activated) sender name.
    pub fn from(mut self, from: impl Into<SenderName>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn to(&self) -> &Recipient {
        &self.to
    }

    pub fn sender(&self) -> Option<&SenderName> {
        self.from.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `get_dlr_response` request.
pub struct GetStatus {
    message_id: MessageId,
}

impl GetStatus {
    pub fn new(message_id: impl Into<MessageId>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }

    pub fn message_id(&self) -> &MessageId {
        &self.message_id
    }
}
