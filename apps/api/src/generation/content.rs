use serde::Serialize;

use crate::localization::contexts::CityContext;

pub const SUBJECT_MAX_CHARS: usize = 60;
pub const SOCIAL_MAX_CHARS: usize = 280;

/// Copy produced for one campaign variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedContent {
    pub email_subject: String,
    pub email_body: String,
    pub social_post: String,
    pub call_to_action: String,
    pub key_benefits: Vec<String>,
    /// Set by the localizer only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_context: Option<&'static CityContext>,
}

impl GeneratedContent {
    pub fn new(
        email_subject: String,
        email_body: String,
        social_post: String,
        call_to_action: String,
        key_benefits: Vec<String>,
    ) -> Self {
        Self {
            email_subject,
            email_body,
            social_post,
            call_to_action,
            key_benefits,
            regional_version: None,
            local_context: None,
        }
    }

    /// Applies the channel length limits. Always the last step of generation.
    pub fn finalize(mut self) -> Self {
        self.email_subject = truncate_chars(&self.email_subject, SUBJECT_MAX_CHARS);
        self.social_post = truncate_chars(&self.social_post, SOCIAL_MAX_CHARS);
        self
    }
}

/// Truncates on character boundaries, never splitting a multi-byte code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
