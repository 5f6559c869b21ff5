//! Model feature vector: eight categorical and four numeric columns.

use serde::{Deserialize, Serialize};

use crate::generation::campaign::{CampaignParameters, Channel};
use crate::prediction::canonical_platform;

pub const CATEGORICAL_FEATURES: [&str; 8] = [
    "brand_id",
    "content_theme",
    "visual_style",
    "target_emotion",
    "campaign_type",
    "platform",
    "target_city",
    "target_age_group",
];

pub const NUMERIC_FEATURES: [&str; 4] = [
    "character_count",
    "readability_score",
    "brand_consistency_score",
    "accessibility_score",
];

/// A complete feature row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInput {
    pub brand_id: String,
    pub content_theme: String,
    pub visual_style: String,
    pub target_emotion: String,
    pub campaign_type: String,
    pub platform: String,
    pub target_city: String,
    pub target_age_group: String,
    pub character_count: f64,
    pub readability_score: f64,
    pub brand_consistency_score: f64,
    pub accessibility_score: f64,
}

impl Default for FeatureInput {
    fn default() -> Self {
        Self {
            brand_id: "upgrad".into(),
            content_theme: "Career Growth".into(),
            visual_style: "Professional".into(),
            target_emotion: "Motivation".into(),
            campaign_type: "Email".into(),
            platform: "LinkedIn".into(),
            target_city: "Bangalore".into(),
            target_age_group: "28-35".into(),
            character_count: 150.0,
            readability_score: 8.0,
            brand_consistency_score: 9.0,
            accessibility_score: 8.5,
        }
    }
}

/// Caller-supplied values; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureOverrides {
    pub brand_id: Option<String>,
    pub content_theme: Option<String>,
    pub visual_style: Option<String>,
    pub target_emotion: Option<String>,
    pub campaign_type: Option<String>,
    pub platform: Option<String>,
    pub target_city: Option<String>,
    pub target_age_group: Option<String>,
    pub character_count: Option<f64>,
    pub readability_score: Option<f64>,
    pub brand_consistency_score: Option<f64>,
    pub accessibility_score: Option<f64>,
}

impl FeatureInput {
    /// Returns a new row with every `Some` override applied.
    pub fn merge(&self, o: &FeatureOverrides) -> FeatureInput {
        let pick = |value: &Option<String>, default: &String| {
            value.clone().unwrap_or_else(|| default.clone())
        };
        FeatureInput {
            brand_id: pick(&o.brand_id, &self.brand_id),
            content_theme: pick(&o.content_theme, &self.content_theme),
            visual_style: pick(&o.visual_style, &self.visual_style),
            target_emotion: pick(&o.target_emotion, &self.target_emotion),
            campaign_type: pick(&o.campaign_type, &self.campaign_type),
            platform: pick(&o.platform, &self.platform),
            target_city: pick(&o.target_city, &self.target_city),
            target_age_group: pick(&o.target_age_group, &self.target_age_group),
            character_count: o.character_count.unwrap_or(self.character_count),
            readability_score: o.readability_score.unwrap_or(self.readability_score),
            brand_consistency_score: o
                .brand_consistency_score
                .unwrap_or(self.brand_consistency_score),
            accessibility_score: o.accessibility_score.unwrap_or(self.accessibility_score),
        }
    }

    /// Features implied by a campaign request, everything else defaulted.
    pub fn from_campaign(params: &CampaignParameters) -> FeatureInput {
        let campaign_type = match params.channel {
            Channel::Email { .. } => "Email",
            Channel::Social { .. } => "Social Media",
            Channel::Sms { .. } => "SMS",
            Channel::Display => "Display Ads",
        };
        let platform = params
            .channel
            .platform()
            .map(|p| canonical_platform(p).map(str::to_string).unwrap_or_else(|| p.to_string()));

        FeatureInput::default().merge(&FeatureOverrides {
            campaign_type: Some(campaign_type.to_string()),
            platform,
            target_city: Some(params.city.clone()),
            ..FeatureOverrides::default()
        })
    }

    pub fn categorical(&self) -> [&str; 8] {
        [
            self.brand_id.as_str(),
            self.content_theme.as_str(),
            self.visual_style.as_str(),
            self.target_emotion.as_str(),
            self.campaign_type.as_str(),
            self.platform.as_str(),
            self.target_city.as_str(),
            self.target_age_group.as_str(),
        ]
    }

    pub fn numeric(&self) -> [f64; 4] {
        [
            self.character_count,
            self.readability_score,
            self.brand_consistency_score,
            self.accessibility_score,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_applies_only_present_fields() {
        let base = FeatureInput::default();
        let merged = base.merge(&FeatureOverrides {
            platform: Some("Instagram".into()),
            character_count: Some(180.0),
            ..Default::default()
        });
        assert_eq!(merged.platform, "Instagram");
        assert_eq!(merged.character_count, 180.0);
        assert_eq!(merged.content_theme, "Career Growth");
        assert_eq!(base.platform, "LinkedIn", "merge must not mutate the base");
    }

    #[test]
    fn test_overrides_reject_unknown_keys() {
        let result: Result<FeatureOverrides, _> =
            serde_json::from_str(r#"{"platfrom":"Instagram"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_campaign_maps_channel() {
        let params = CampaignParameters {
            course: "AI/ML".into(),
            city: "Hyderabad".into(),
            channel: Channel::Social {
                platform: "instagram".into(),
                format: "reel".into(),
            },
            tone_scale: 5,
            language: "English".into(),
            variant_number: 1,
        };
        let features = FeatureInput::from_campaign(&params);
        assert_eq!(features.campaign_type, "Social Media");
        assert_eq!(features.platform, "Instagram");
        assert_eq!(features.target_city, "Hyderabad");
        assert_eq!(features.brand_id, "upgrad");
    }

    #[test]
    fn test_column_order() {
        let f = FeatureInput::default();
        assert_eq!(f.categorical()[5], "LinkedIn");
        assert_eq!(f.numeric(), [150.0, 8.0, 9.0, 8.5]);
    }
}
