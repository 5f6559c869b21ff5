//! Content Generation Pipeline.
//!
//! Flow: build prompt → model call (bounded) → section parse → optional
//!       bilingual pass → length limits. Any `GenerationError` on the model
//!       path is matched in `generate` and replaced by template content built
//!       from the same inputs, so callers always receive content.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::campaign::{CampaignParameters, Channel};
use crate::generation::content::{truncate_chars, GeneratedContent};
use crate::generation::fallback::fallback_content;
use crate::generation::parser::SectionParser;
use crate::generation::prompts::{
    social_char_limit, BILINGUAL_PROMPT_TEMPLATE, CONTENT_PROMPT_TEMPLATE, EMAIL_PROMPT_TEMPLATE,
    MARKET_CONTEXT_BLOCK, SMS_PROMPT_TEMPLATE, SOCIAL_PROMPT_TEMPLATE,
};
use crate::generation::regional::regional_elements;
use crate::generation::tone::ToneBand;
use crate::llm_client::prompts::{BRAND_GUIDELINES, SECTION_FORMAT_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};
use crate::market::{MarketContext, MarketSnapshot};

/// Characters of model output quoted in the bilingual prompt.
const BILINGUAL_EXCERPT_CHARS: usize = 200;
/// Characters of the bilingual reply appended to the body.
const BILINGUAL_APPEND_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no text-generation credential configured")]
    NotConfigured,

    #[error("upstream model error: {0}")]
    Upstream(#[from] LlmError),

    #[error("model call exceeded {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub content: GeneratedContent,
    pub source: ContentSource,
}

pub struct ContentGenerator {
    llm: Option<Arc<dyn TextGenerator>>,
    parser: SectionParser,
    brand: String,
    deadline: Duration,
}

impl ContentGenerator {
    pub fn new(
        llm: Option<Arc<dyn TextGenerator>>,
        brand: impl Into<String>,
        deadline: Duration,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            llm,
            parser: SectionParser::new()?,
            brand: brand.into(),
            deadline,
        })
    }

    pub fn model_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Never fails: model errors degrade to template content.
    pub async fn generate(
        &self,
        params: &CampaignParameters,
        market: &MarketSnapshot,
        context: &MarketContext,
    ) -> Generated {
        match self.generate_with_model(params, market, context).await {
            Ok(content) => Generated {
                content,
                source: ContentSource::Model,
            },
            Err(GenerationError::NotConfigured) => {
                debug!("No model configured; using template content");
                self.fallback(params, market)
            }
            Err(e) => {
                warn!(city = %params.city, course = %params.course, error = %e, "Model generation failed; using template content");
                self.fallback(params, market)
            }
        }
    }

    fn fallback(&self, params: &CampaignParameters, market: &MarketSnapshot) -> Generated {
        Generated {
            content: fallback_content(params, market, &self.brand),
            source: ContentSource::Fallback,
        }
    }

    /// The model path as an explicit result, bounded by one overall deadline.
    pub async fn generate_with_model(
        &self,
        params: &CampaignParameters,
        market: &MarketSnapshot,
        context: &MarketContext,
    ) -> Result<GeneratedContent, GenerationError> {
        let llm = self.llm.as_deref().ok_or(GenerationError::NotConfigured)?;
        let prompt = self.build_prompt(params, market, context);

        tokio::time::timeout(self.deadline, self.call_model(llm, &prompt, params))
            .await
            .map_err(|_| GenerationError::Timeout(self.deadline))?
    }

    async fn call_model(
        &self,
        llm: &dyn TextGenerator,
        prompt: &str,
        params: &CampaignParameters,
    ) -> Result<GeneratedContent, GenerationError> {
        let raw = llm.generate_text(prompt).await?;
        let mut content = self
            .parser
            .parse(&raw, &params.course, &params.city, &self.brand);

        if matches!(params.language.as_str(), "Hindi" | "Multi") {
            let bilingual_prompt = BILINGUAL_PROMPT_TEMPLATE
                .replace("{excerpt}", &truncate_chars(&raw, BILINGUAL_EXCERPT_CHARS));
            match llm.generate_text(&bilingual_prompt).await {
                Ok(extra) => {
                    content.email_body.push_str(&format!(
                        "\n\n🇮🇳 {}...",
                        truncate_chars(&extra, BILINGUAL_APPEND_CHARS)
                    ));
                }
                Err(e) => warn!(error = %e, "Bilingual pass failed; keeping primary content"),
            }
        }

        Ok(content.finalize())
    }

    pub fn build_prompt(
        &self,
        params: &CampaignParameters,
        market: &MarketSnapshot,
        context: &MarketContext,
    ) -> String {
        let band = ToneBand::from_scale(params.tone_scale);
        let regional = regional_elements(&params.city, &params.language);

        let body = match &params.channel {
            Channel::Email {
                email_type,
                subject_style,
            } => EMAIL_PROMPT_TEMPLATE
                .replace("{email_type}", email_type)
                .replace("{subject_style}", subject_style)
                .replace("{language}", &params.language),
            Channel::Social { platform, format } => SOCIAL_PROMPT_TEMPLATE
                .replace("{platform}", platform)
                .replace("{format}", format)
                .replace("{char_limit}", &social_char_limit(platform).to_string()),
            Channel::Sms {
                sms_type,
                max_length,
            } => SMS_PROMPT_TEMPLATE
                .replace("{sms_type}", sms_type)
                .replace("{max_length}", &max_length.to_string()),
            Channel::Display => CONTENT_PROMPT_TEMPLATE
                .replace("{urgency}", band.urgency())
                .replace("{language}", &params.language)
                .replace("{campaign_type}", params.channel.kind()),
        };

        let body = body
            .replace("{brand}", &self.brand)
            .replace("{course}", &params.course)
            .replace("{city}", &params.city)
            .replace("{positions}", &market.positions_available.to_string())
            .replace("{companies}", &market.companies_hiring.to_string())
            .replace("{avg_salary}", &market.avg_salary)
            .replace("{tone}", band.style())
            .replace("{regional}", &regional)
            .replace("{variant}", &params.variant_number.to_string());

        let market_block = MARKET_CONTEXT_BLOCK
            .replace("{summary}", &context.summary)
            .replace("{hooks}", &context.campaign_hooks.join("; "));

        format!(
            "{body}\n\n{market_block}\n\n{}\n\n{SECTION_FORMAT_INSTRUCTION}",
            BRAND_GUIDELINES.replace("{brand}", &self.brand)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::market::fallback::snapshot;

    /// Replays canned replies in order; an `Err` entry fails that call.
    struct ScriptedModel {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedModel {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(LlmError::EmptyContent);
            }
            replies.remove(0)
        }
    }

    struct SlowModel;

    #[async_trait]
    impl TextGenerator for SlowModel {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("SUBJECT: too late".into())
        }
    }

    const MODEL_TEXT: &str = "SUBJECT: Bangalore AI/ML careers are calling you today, apply before the window closes for good
BODY: Dear professional, 2500 roles await.
SOCIAL: AI/ML is hot #AI
CTA: Apply
BENEFITS: One | Two | Three";

    fn params(language: &str) -> CampaignParameters {
        CampaignParameters {
            course: "AI/ML".into(),
            city: "Bangalore".into(),
            channel: Channel::Email {
                email_type: "promotional".into(),
                subject_style: "benefit".into(),
            },
            tone_scale: 5,
            language: language.into(),
            variant_number: 1,
        }
    }

    fn context() -> MarketContext {
        MarketContext {
            summary: "Bangalore has 2500 open positions across 85 companies.".into(),
            campaign_hooks: vec!["Over 2500 job opportunities available".into()],
            course_relevance: None,
        }
    }

    fn generator(llm: Option<Arc<dyn TextGenerator>>) -> ContentGenerator {
        ContentGenerator::new(llm, "upGrad", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_without_model_uses_fallback() {
        let market = snapshot("Bangalore");
        let out = generator(None).generate(&params("English"), &market, &context()).await;
        assert_eq!(out.source, ContentSource::Fallback);
        assert_eq!(out.content, fallback_content(&params("English"), &market, "upGrad"));
    }

    #[tokio::test]
    async fn test_model_output_is_parsed_and_truncated() {
        let model = ScriptedModel::new(vec![Ok(MODEL_TEXT.into())]);
        let market = snapshot("Bangalore");
        let out = generator(Some(model.clone()))
            .generate(&params("English"), &market, &context())
            .await;
        assert_eq!(out.source, ContentSource::Model);
        assert_eq!(out.content.email_subject.chars().count(), 60);
        assert!(out.content.email_subject.starts_with("Bangalore AI/ML careers"));
        assert_eq!(out.content.key_benefits, vec!["One", "Two", "Three"]);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_falls_back_to_same_inputs() {
        let model = ScriptedModel::new(vec![Err(LlmError::Api {
            status: 401,
            message: "bad key".into(),
        })]);
        let market = snapshot("Mumbai");
        let out = generator(Some(model))
            .generate(&params("English"), &market, &context())
            .await;
        assert_eq!(out.source, ContentSource::Fallback);
        assert_eq!(out.content, fallback_content(&params("English"), &market, "upGrad"));
    }

    #[tokio::test]
    async fn test_model_path_reports_error_variant() {
        let model = ScriptedModel::new(vec![Err(LlmError::EmptyContent)]);
        let result = generator(Some(model))
            .generate_with_model(&params("English"), &snapshot("Pune"), &context())
            .await;
        assert!(matches!(result, Err(GenerationError::Upstream(LlmError::EmptyContent))));

        let none = generator(None)
            .generate_with_model(&params("English"), &snapshot("Pune"), &context())
            .await;
        assert!(matches!(none, Err(GenerationError::NotConfigured)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_times_out_into_fallback() {
        let gen = generator(Some(Arc::new(SlowModel)));
        let result = gen
            .generate_with_model(&params("English"), &snapshot("Pune"), &context())
            .await;
        assert!(matches!(result, Err(GenerationError::Timeout(_))));

        let out = gen.generate(&params("English"), &snapshot("Pune"), &context()).await;
        assert_eq!(out.source, ContentSource::Fallback);
    }

    #[tokio::test]
    async fn test_hindi_appends_bilingual_excerpt() {
        let model = ScriptedModel::new(vec![Ok(MODEL_TEXT.into()), Ok("नमस्ते ".repeat(50))]);
        let out = generator(Some(model.clone()))
            .generate(&params("Hindi"), &snapshot("Delhi NCR"), &context())
            .await;
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert!(out.content.email_body.starts_with("Dear professional, 2500 roles await."));
        assert!(out.content.email_body.contains("\n\n🇮🇳 नमस्ते"));
        assert!(out.content.email_body.ends_with("..."));
    }

    #[tokio::test]
    async fn test_failed_bilingual_pass_is_ignored() {
        let model = ScriptedModel::new(vec![Ok(MODEL_TEXT.into()), Err(LlmError::EmptyContent)]);
        let out = generator(Some(model))
            .generate(&params("Multi"), &snapshot("Delhi NCR"), &context())
            .await;
        assert_eq!(out.source, ContentSource::Model);
        assert_eq!(out.content.email_body, "Dear professional, 2500 roles await.");
    }

    #[test]
    fn test_prompt_embeds_market_and_channel_details() {
        let market = snapshot("Bangalore");
        let prompt = generator(None).build_prompt(&params("English"), &market, &context());
        assert!(prompt.contains("upGrad's AI/ML course targeting professionals in Bangalore"));
        assert!(prompt.contains("2500+ job positions available"));
        assert!(prompt.contains("Subject line style: benefit"));
        assert!(prompt.contains("MARKET INSIGHT: Bangalore has 2500 open positions"));
        assert!(prompt.contains("BENEFITS: [benefit 1]"));
        assert!(!prompt.contains('{'), "unfilled placeholder in prompt");
    }

    #[test]
    fn test_social_prompt_quotes_platform_limit() {
        let mut p = params("English");
        p.channel = Channel::Social {
            platform: "twitter".into(),
            format: "thread".into(),
        };
        let prompt = generator(None).build_prompt(&p, &snapshot("Pune"), &context());
        assert!(prompt.contains("Character limit: 280"));
        assert!(prompt.contains("Create a twitter thread"));
    }
}
