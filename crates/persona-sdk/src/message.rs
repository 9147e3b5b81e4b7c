//! Message parts that go through personalization

use serde::{Deserialize, Serialize};

/// The personalizable parts of an outgoing message.
///
/// Building headers and delivering the message happen elsewhere; this only
/// carries the texts the engine rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageParts {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: String,
    /// HTML body; `None` for text-only messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl MessageParts {
    pub fn new(subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
            html: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}
