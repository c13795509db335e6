use serde::Serialize;
use strum::AsRefStr;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// JSON envelope returned by the wishlist endpoints.
#[derive(Debug, Serialize)]
pub struct ApiMessage<T: Serialize> {
    pub message: String,
    pub level: MessageLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiMessage<T> {
    pub fn new(level: MessageLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            data: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, message)
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}
