//! Localization Post-Processor.
//!
//! Pure string transformations over generated copy. The order of the body
//! clauses is fixed so output is reproducible.

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::generation::content::{truncate_chars, GeneratedContent, SOCIAL_MAX_CHARS, SUBJECT_MAX_CHARS};
use crate::localization::contexts::{
    city_context, local_events, regional_phrases, CityContext, Relevance, COURSE_INDUSTRIES,
};

pub const REGIONAL_UNAVAILABLE: &str = "Regional version not available for this city.";

/// Posts shorter than this get an extra landmark hashtag.
const LANDMARK_TAG_BUDGET: usize = 200;

const FAMILY_CLOSING: &str = "Join thousands of professionals who've transformed their careers while maintaining work-life balance.";
const FAST_PACED_CLOSING: &str =
    "Join the fast-track to success with industry-leading curriculum and expert mentorship.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalTiming {
    pub best_time: &'static str,
    pub avoid: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizationRecommendations {
    pub city: String,
    pub course: String,
    pub tone_adjustments: Vec<&'static str>,
    pub cultural_considerations: Vec<&'static str>,
    pub local_hooks: Vec<String>,
    pub language_preference: &'static str,
    pub optimal_timing: OptimalTiming,
    pub platform_preferences: Vec<&'static str>,
}

pub struct Localizer {
    brand: String,
    hashtag: Regex,
}

impl Localizer {
    pub fn new(brand: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            brand: brand.into(),
            hashtag: Regex::new(r"#\w+")?,
        })
    }

    pub fn supports(&self, city: &str) -> bool {
        city_context(city).is_some()
    }

    /// Adapts content to `city`. Cities without a context record are returned unchanged.
    pub fn localize(&self, content: GeneratedContent, city: &str) -> GeneratedContent {
        let Some(ctx) = city_context(city) else {
            debug!("No localization data for city '{city}'");
            return content;
        };

        let email_subject = localize_subject(&content.email_subject, ctx);
        let email_body = localize_body(&content.email_body, ctx);
        let social_post = self.localize_social(&content.social_post, ctx);

        GeneratedContent {
            email_subject,
            email_body,
            social_post,
            regional_version: Some(self.regional_version(ctx)),
            local_context: Some(ctx),
            ..content
        }
    }

    fn localize_social(&self, post: &str, ctx: &CityContext) -> String {
        let mut social = self.hashtag.replace_all(post, "").trim().to_string();
        social.push(' ');
        social.push_str(&ctx.hashtags.iter().take(3).copied().collect::<Vec<_>>().join(" "));

        if social.chars().count() < LANDMARK_TAG_BUDGET {
            if let Some(landmark) = ctx.local_references.first() {
                social.push_str(" #");
                social.extend(landmark.chars().filter(|c| !c.is_whitespace()));
            }
        }
        truncate_chars(&social, SOCIAL_MAX_CHARS)
    }

    fn regional_version(&self, ctx: &CityContext) -> String {
        match regional_phrases(ctx.city) {
            Some(p) => format!(
                "{}! {} mein {} hai! Apna {} transform karo aur {} pao {} ke saath!",
                p.hello, ctx.nickname, p.opportunity, p.career, p.success, self.brand
            ),
            None => REGIONAL_UNAVAILABLE.to_string(),
        }
    }

    /// Channel and tone guidance for a city/course pair; `None` for unknown cities.
    pub fn recommendations(&self, city: &str, course: &str) -> Option<LocalizationRecommendations> {
        let ctx = city_context(city)?;
        let tone = ctx.cultural_tone.to_lowercase();
        let culture = ctx.work_culture.to_lowercase();

        let mut tone_adjustments = Vec::new();
        if tone.contains("formal") || tone.contains("hierarchical") {
            tone_adjustments.push("Use formal, respectful language");
            tone_adjustments.push("Emphasize authority and credentials");
        }
        if tone.contains("tech-forward") || tone.contains("innovation") {
            tone_adjustments.push("Use tech terminology and innovation language");
            tone_adjustments.push("Highlight cutting-edge curriculum");
        }
        if tone.contains("traditional") {
            tone_adjustments.push("Balance modern content with traditional values");
            tone_adjustments.push("Emphasize family and stability benefits");
        }

        let mut cultural_considerations = Vec::new();
        if culture.contains("family-friendly") {
            cultural_considerations.push("Emphasize work-life balance");
            cultural_considerations.push("Mention flexible learning options");
        }
        if culture.contains("networking") {
            cultural_considerations.push("Highlight networking opportunities");
            cultural_considerations.push("Mention industry connections");
        }
        if culture.contains("entrepreneurial") {
            cultural_considerations.push("Focus on business skills and startup opportunities");
            cultural_considerations.push("Mention entrepreneurship support");
        }

        let mut local_hooks = vec![format!("Join {}'s tech revolution", ctx.nickname)];
        if let Some(industry) = relevant_industry(ctx, course) {
            local_hooks.push(format!("{industry} professionals in high demand"));
        }

        let optimal_timing = if culture.contains("fast-paced") {
            OptimalTiming {
                best_time: "Early morning or late evening",
                avoid: "Lunch hours",
            }
        } else if culture.contains("traditional") {
            OptimalTiming {
                best_time: "Business hours",
                avoid: "Early morning or late evening",
            }
        } else {
            OptimalTiming {
                best_time: "Business hours",
                avoid: "Weekends",
            }
        };

        let platform_preferences = if tone.contains("tech-forward") {
            vec!["LinkedIn", "Twitter", "Instagram"]
        } else if tone.contains("traditional") {
            vec!["LinkedIn", "Facebook", "Email"]
        } else if tone.contains("business") {
            vec!["LinkedIn", "Email", "WhatsApp Business"]
        } else {
            vec!["LinkedIn", "Facebook", "Instagram"]
        };

        Some(LocalizationRecommendations {
            city: ctx.city.to_string(),
            course: course.to_string(),
            tone_adjustments,
            cultural_considerations,
            local_hooks,
            language_preference: ctx.language_preference,
            optimal_timing,
            platform_preferences,
        })
    }
}

fn localize_subject(subject: &str, ctx: &CityContext) -> String {
    let mut subject = if subject.contains(ctx.nickname) {
        subject.to_string()
    } else {
        format!("{subject} | {}", ctx.nickname)
    };
    if ctx.market_sentiment.to_lowercase().contains("high competition") {
        subject = subject.replacen('!', " - Act Fast!", 1);
    }
    truncate_chars(&subject, SUBJECT_MAX_CHARS)
}

fn localize_body(body: &str, ctx: &CityContext) -> String {
    let mut body = body.to_string();

    // industries, event, landmark, closing
    if !ctx.key_industries.is_empty() {
        let lead: Vec<&str> = ctx.key_industries.iter().take(2).copied().collect();
        body.push_str(&format!(
            "\n\nWith {} leading {}'s growth",
            lead.join(", "),
            ctx.nickname
        ));
    }
    if let Some(event) = local_events(ctx.city)
        .iter()
        .find(|e| e.relevance == Relevance::High)
    {
        body.push_str(&format!(", and upcoming events like {}", event.name));
    }
    if let Some(landmark) = ctx.local_references.first() {
        body.push_str(&format!(" in areas like {landmark}"));
    }
    if !body.trim_end().ends_with(&['.', '!', '?'][..]) {
        body.push('.');
    }

    let culture = ctx.work_culture.to_lowercase();
    if culture.contains("family-friendly") {
        body.push_str("\n\n");
        body.push_str(FAMILY_CLOSING);
    } else if culture.contains("fast-paced") {
        body.push_str("\n\n");
        body.push_str(FAST_PACED_CLOSING);
    }
    body
}

/// First city industry matching the course's industry list, else the city's first industry.
fn relevant_industry(ctx: &CityContext, course: &str) -> Option<&'static str> {
    let wanted: &[&str] = COURSE_INDUSTRIES
        .iter()
        .find(|(name, _)| *name == course)
        .map(|(_, industries)| *industries)
        .unwrap_or(&[]);

    ctx.key_industries
        .iter()
        .find(|industry| {
            let industry = industry.to_lowercase();
            wanted.iter().any(|w| industry.contains(&w.to_lowercase()))
        })
        .or_else(|| ctx.key_industries.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedContent {
        GeneratedContent::new(
            "Transform Your Career!".into(),
            "Join our AI/ML program.".into(),
            "🚀 Big news! #AI #Career".into(),
            "Enroll Now".into(),
            vec!["a".into(), "b".into(), "c".into()],
        )
    }

    fn localizer() -> Localizer {
        Localizer::new("upGrad").unwrap()
    }

    #[test]
    fn test_unknown_city_is_a_no_op() {
        let content = sample();
        assert_eq!(localizer().localize(content.clone(), "Atlantis"), content);
    }

    #[test]
    fn test_lowercase_city_is_localized() {
        let l = localizer();
        assert!(l.supports("mumbai"));
        let lower = l.localize(sample(), "mumbai");
        assert_eq!(lower, l.localize(sample(), "Mumbai"));
        assert_eq!(lower.local_context.map(|c| c.city), Some("Mumbai"));
    }

    #[test]
    fn test_body_never_ends_with_double_period() {
        static BARE: CityContext = CityContext {
            city: "Testville",
            nickname: "Test City",
            key_industries: &[],
            cultural_tone: "",
            local_events: &[],
            language_preference: "",
            market_sentiment: "",
            salary_expectations: "",
            work_culture: "",
            key_companies: &[],
            hashtags: &[],
            local_references: &[],
        };
        assert_eq!(localize_body("Join our AI/ML program.", &BARE), "Join our AI/ML program.");
        assert_eq!(localize_body("Apply today!", &BARE), "Apply today!");
        assert_eq!(localize_body("Apply today", &BARE), "Apply today.");
    }

    #[test]
    fn test_bangalore_subject_gets_nickname_and_act_fast() {
        let out = localizer().localize(sample(), "Bangalore");
        assert_eq!(
            out.email_subject,
            "Transform Your Career - Act Fast! | Silicon Valley of India"
        );
        assert!(out.email_subject.chars().count() <= 60);
    }

    #[test]
    fn test_only_first_exclamation_is_rewritten() {
        let ctx = city_context("Bangalore").unwrap();
        let subject = localize_subject("Go! Now!", ctx);
        assert!(subject.starts_with("Go - Act Fast! Now!"));
    }

    #[test]
    fn test_subject_with_nickname_is_not_duplicated() {
        let ctx = city_context("Hyderabad").unwrap();
        assert_eq!(localize_subject("Grow in Cyberabad", ctx), "Grow in Cyberabad");
    }

    #[test]
    fn test_body_clauses_in_order() {
        let out = localizer().localize(sample(), "Bangalore");
        assert_eq!(
            out.email_body,
            "Join our AI/ML program.\n\nWith IT Services, Startups leading Silicon Valley of India's growth, \
             and upcoming events like Bangalore Tech Summit in areas like Namma Metro.\n\n\
             Join the fast-track to success with industry-leading curriculum and expert mentorship."
        );
    }

    #[test]
    fn test_family_friendly_closing_without_events() {
        let out = localizer().localize(sample(), "Hyderabad");
        assert!(!out.email_body.contains("upcoming events"));
        assert!(out.email_body.ends_with(FAMILY_CLOSING));
    }

    #[test]
    fn test_social_hashtags_replaced() {
        let out = localizer().localize(sample(), "Mumbai");
        assert!(!out.social_post.contains("#AI "));
        assert!(!out.social_post.contains("#Career"));
        assert!(out
            .social_post
            .contains("#MumbaiFinance #MaxCity #BombayDreams #NarimanPoint"));
    }

    #[test]
    fn test_social_is_capped_and_long_posts_skip_landmark() {
        let mut content = sample();
        content.social_post = "x".repeat(300);
        let out = localizer().localize(content, "Pune");
        assert!(out.social_post.chars().count() <= 280);
        assert!(!out.social_post.contains("#Hinjewadi"));
    }

    #[test]
    fn test_regional_version() {
        let out = localizer().localize(sample(), "Chennai");
        assert_eq!(
            out.regional_version.as_deref(),
            Some("Vanakkam! Detroit of India mein Vaaipu hai! Apna Thozhil transform karo aur Vetri pao upGrad ke saath!")
        );
        let kolkata = localizer().localize(sample(), "Kolkata");
        assert_eq!(kolkata.regional_version.as_deref(), Some(REGIONAL_UNAVAILABLE));
        assert_eq!(kolkata.local_context.map(|c| c.city), Some("Kolkata"));
    }

    #[test]
    fn test_recommendations_for_bangalore() {
        let recs = localizer().recommendations("Bangalore", "AI/ML").unwrap();
        assert!(recs
            .tone_adjustments
            .contains(&"Use tech terminology and innovation language"));
        assert_eq!(recs.local_hooks[1], "IT Services professionals in high demand");
        assert_eq!(recs.optimal_timing.avoid, "Lunch hours");
        assert_eq!(recs.platform_preferences, vec!["LinkedIn", "Twitter", "Instagram"]);
    }

    #[test]
    fn test_recommendations_unknown_city() {
        assert!(localizer().recommendations("Atlantis", "AI/ML").is_none());
    }

    #[test]
    fn test_relevant_industry_defaults_to_first() {
        let ctx = city_context("Chennai").unwrap();
        assert_eq!(relevant_industry(ctx, "MSc Finance"), Some("Automotive"));
        let mumbai = city_context("Mumbai").unwrap();
        assert_eq!(relevant_industry(mumbai, "MSc Finance"), Some("Finance"));
    }
}
