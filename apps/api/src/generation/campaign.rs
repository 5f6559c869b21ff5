//! Campaign request validation.
//!
//! The wire request is loose (every field optional, as the dashboard sends it).
//! It is validated once into a `CampaignPlan` whose `Channel` carries only the
//! fields that matter for the chosen campaign type.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MAX_VARIANTS: u8 = 10;
pub const DEFAULT_TONE: u8 = 5;
const DEFAULT_LANGUAGE: &str = "English";
const DEFAULT_SMS_LENGTH: u32 = 160;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignRequest {
    #[serde(default)]
    pub course: String,
    pub city: Option<String>,
    pub cities: Option<Vec<String>>,
    pub campaign_type: Option<String>,
    pub variants: Option<i64>,
    pub tone_scale: Option<i64>,
    pub language: Option<String>,
    pub localization: Option<String>,

    pub email_type: Option<String>,
    pub subject_style: Option<String>,

    pub platform: Option<String>,
    pub format: Option<String>,

    pub sms_type: Option<String>,
    pub max_length: Option<u32>,
}

/// Campaign type with its channel-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "campaign_type", rename_all = "lowercase")]
pub enum Channel {
    Email {
        email_type: String,
        subject_style: String,
    },
    Social {
        platform: String,
        format: String,
    },
    Sms {
        sms_type: String,
        max_length: u32,
    },
    #[serde(rename = "content")]
    Display,
}

impl Channel {
    pub fn kind(&self) -> &'static str {
        match self {
            Channel::Email { .. } => "email",
            Channel::Social { .. } => "social",
            Channel::Sms { .. } => "sms",
            Channel::Display => "content",
        }
    }

    pub fn platform(&self) -> Option<&str> {
        match self {
            Channel::Social { platform, .. } => Some(platform),
            _ => None,
        }
    }
}

/// Inputs to one generation + prediction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignParameters {
    pub course: String,
    pub city: String,
    pub channel: Channel,
    pub tone_scale: u8,
    pub language: String,
    pub variant_number: u32,
}

/// A validated campaign request.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignPlan {
    pub course: String,
    /// Never empty; the first entry drives market data and generation.
    pub cities: Vec<String>,
    pub channel: Channel,
    pub tone_scale: u8,
    pub language: String,
    pub variants: u8,
    pub localize: bool,
}

impl CampaignPlan {
    pub fn primary_city(&self) -> &str {
        &self.cities[0]
    }

    pub fn parameters(&self, variant_number: u32) -> CampaignParameters {
        CampaignParameters {
            course: self.course.clone(),
            city: self.primary_city().to_string(),
            channel: self.channel.clone(),
            tone_scale: self.tone_scale,
            language: self.language.clone(),
            variant_number,
        }
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl TryFrom<CampaignRequest> for CampaignPlan {
    type Error = AppError;

    fn try_from(req: CampaignRequest) -> Result<Self, Self::Error> {
        let course = req.course.trim().to_string();
        if course.is_empty() {
            return Err(AppError::Validation("course cannot be empty".to_string()));
        }

        let mut cities: Vec<String> = req
            .cities
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if cities.is_empty() {
            if let Some(city) = req.city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
                cities.push(city);
            }
        }
        if cities.is_empty() {
            return Err(AppError::Validation(
                "city or cities must be provided".to_string(),
            ));
        }

        let tone = req.tone_scale.unwrap_or(DEFAULT_TONE as i64);
        if !(1..=10).contains(&tone) {
            return Err(AppError::Validation(format!(
                "tone_scale must be between 1 and 10, got {tone}"
            )));
        }

        let kind = req
            .campaign_type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "content".to_string());
        let channel = match kind.as_str() {
            "email" => Channel::Email {
                email_type: text_or(req.email_type, "promotional"),
                subject_style: text_or(req.subject_style, "benefit"),
            },
            "social" => Channel::Social {
                platform: text_or(req.platform, "linkedin"),
                format: text_or(req.format, "post"),
            },
            "sms" => Channel::Sms {
                sms_type: text_or(req.sms_type, "promotional"),
                max_length: req.max_length.filter(|l| *l > 0).unwrap_or(DEFAULT_SMS_LENGTH),
            },
            "content" | "display" => Channel::Display,
            other => {
                return Err(AppError::Validation(format!(
                    "unknown campaign_type '{other}' (expected email, social, sms or content)"
                )))
            }
        };

        let variants = req.variants.unwrap_or(1).clamp(1, MAX_VARIANTS as i64) as u8;

        let localize = req
            .localization
            .map(|l| !l.trim().eq_ignore_ascii_case("basic"))
            .unwrap_or(false);

        Ok(CampaignPlan {
            course,
            cities,
            channel,
            tone_scale: tone as u8,
            language: text_or(req.language, DEFAULT_LANGUAGE),
            variants,
            localize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CampaignRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_request_defaults() {
        let plan = CampaignPlan::try_from(request(r#"{"course":"AI/ML","city":"Bangalore"}"#)).unwrap();
        assert_eq!(plan.channel, Channel::Display);
        assert_eq!(plan.tone_scale, 5);
        assert_eq!(plan.variants, 1);
        assert_eq!(plan.language, "English");
        assert!(!plan.localize);
        assert_eq!(plan.primary_city(), "Bangalore");
    }

    #[test]
    fn test_email_channel_fields() {
        let plan = CampaignPlan::try_from(request(
            r#"{"course":"AI/ML","city":"Pune","campaign_type":"Email","subject_style":"curiosity"}"#,
        ))
        .unwrap();
        assert_eq!(
            plan.channel,
            Channel::Email {
                email_type: "promotional".into(),
                subject_style: "curiosity".into()
            }
        );
        assert_eq!(plan.channel.kind(), "email");
    }

    #[test]
    fn test_social_and_sms_channels() {
        let social = CampaignPlan::try_from(request(
            r#"{"course":"AI/ML","city":"Pune","campaign_type":"social","platform":"Instagram"}"#,
        ))
        .unwrap();
        assert_eq!(social.channel.platform(), Some("Instagram"));

        let sms = CampaignPlan::try_from(request(
            r#"{"course":"AI/ML","city":"Pune","campaign_type":"sms","max_length":0}"#,
        ))
        .unwrap();
        assert_eq!(
            sms.channel,
            Channel::Sms {
                sms_type: "promotional".into(),
                max_length: 160
            }
        );
        assert_eq!(sms.channel.platform(), None);
    }

    #[test]
    fn test_cities_take_precedence_over_city() {
        let plan = CampaignPlan::try_from(request(
            r#"{"course":"AI/ML","city":"Pune","cities":["Mumbai"," ","Chennai"]}"#,
        ))
        .unwrap();
        assert_eq!(plan.cities, vec!["Mumbai", "Chennai"]);
    }

    #[test]
    fn test_variants_are_clamped() {
        let many = CampaignPlan::try_from(request(r#"{"course":"x","city":"y","variants":50}"#)).unwrap();
        assert_eq!(many.variants, MAX_VARIANTS);
        let none = CampaignPlan::try_from(request(r#"{"course":"x","city":"y","variants":0}"#)).unwrap();
        assert_eq!(none.variants, 1);
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            r#"{"course":"","city":"Pune"}"#,
            r#"{"course":"AI/ML"}"#,
            r#"{"course":"AI/ML","city":"  "}"#,
            r#"{"course":"AI/ML","city":"Pune","tone_scale":0}"#,
            r#"{"course":"AI/ML","city":"Pune","tone_scale":11}"#,
            r#"{"course":"AI/ML","city":"Pune","campaign_type":"fax"}"#,
        ];
        for json in cases {
            let result = CampaignPlan::try_from(request(json));
            assert!(
                matches!(result, Err(AppError::Validation(_))),
                "expected validation error for {json}"
            );
        }
    }

    #[test]
    fn test_localization_level() {
        let basic = CampaignPlan::try_from(request(r#"{"course":"x","city":"y","localization":"Basic"}"#)).unwrap();
        assert!(!basic.localize);
        let deep = CampaignPlan::try_from(request(r#"{"course":"x","city":"y","localization":"hyper-local"}"#)).unwrap();
        assert!(deep.localize);
    }

    #[test]
    fn test_parameters_for_variant() {
        let plan = CampaignPlan::try_from(request(r#"{"course":"AI/ML","cities":["Mumbai","Pune"],"tone_scale":9}"#)).unwrap();
        let params = plan.parameters(3);
        assert_eq!(params.city, "Mumbai");
        assert_eq!(params.variant_number, 3);
        assert_eq!(params.tone_scale, 9);
    }
}
