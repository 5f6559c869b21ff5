// Prompt templates for campaign generation, one per channel.
// Shared fragments (output format, brand voice) come from llm_client::prompts.

/// Email prompt. Replace: {brand}, {course}, {city}, {positions}, {companies}, {avg_salary},
/// {email_type}, {subject_style}, {tone}, {language}, {regional}, {variant}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Create an email marketing campaign for {brand}'s {course} course targeting professionals in {city}.

MARKET DATA:
- {positions}+ job positions available
- {companies} companies actively hiring
- Average salary: {avg_salary}
- City: {city}

EMAIL SPECIFICATIONS:
- Email type: {email_type}
- Subject line style: {subject_style}
- Tone: {tone}
- Language: {language}
- Regional elements: {regional}
- Variant: #{variant}

Generate a complete email with:
1. Compelling subject line using {subject_style} approach
2. Personalized greeting for {city} professionals
3. Market opportunity highlighting {positions}+ jobs
4. {brand} course benefits and value proposition
5. Clear call-to-action
6. Regional language touches: {regional}"#;

/// Social prompt. Replace: {brand}, {course}, {city}, {positions}, {companies}, {avg_salary},
/// {platform}, {format}, {char_limit}, {tone}, {regional}, {variant}
pub const SOCIAL_PROMPT_TEMPLATE: &str = r#"Create a {platform} {format} for {brand}'s {course} course targeting {city} professionals.

MARKET DATA:
- {positions}+ positions available in {city}
- {companies} companies hiring
- Average salary: {avg_salary}

SOCIAL MEDIA SPECS:
- Platform: {platform}
- Format: {format}
- Character limit: {char_limit}
- Tone: {tone}
- Regional touch: {regional}
- Variant: #{variant}

Create engaging {platform} content that:
1. Hooks attention in first line
2. Highlights {city} job market boom
3. Showcases {brand}'s credibility
4. Uses relevant hashtags for {platform}
5. Includes regional elements: {regional}
6. Stays under {char_limit} characters

Make it {platform}-optimized and shareable."#;

/// SMS prompt. Replace: {brand}, {course}, {city}, {positions}, {companies}, {avg_salary},
/// {sms_type}, {max_length}, {tone}, {regional}, {variant}
pub const SMS_PROMPT_TEMPLATE: &str = r#"Create SMS/WhatsApp messages for {brand}'s {course} course targeting {city} professionals.

MARKET DATA:
- {positions}+ jobs in {city}
- {companies} companies hiring
- Average salary: {avg_salary}

SMS SPECIFICATIONS:
- Message type: {sms_type}
- Max length: {max_length} characters
- Tone: {tone}
- Regional touch: {regional}
- Variant: #{variant}

Create concise message that:
1. Grabs attention immediately
2. Mentions {city} job opportunities
3. Clear {brand} value proposition
4. Strong call-to-action
5. Stays under {max_length} characters
6. Uses regional elements: {regional}

Be direct, urgent, and actionable."#;

/// Generic content prompt. Replace: {brand}, {course}, {city}, {positions}, {companies},
/// {avg_salary}, {tone}, {urgency}, {language}, {regional}, {variant}, {campaign_type}
pub const CONTENT_PROMPT_TEMPLATE: &str = r#"Create a marketing campaign for {brand}'s {course} course targeting professionals in {city}.

MARKET DATA:
- {positions}+ job positions available
- {companies} companies actively hiring
- Average salary: {avg_salary}
- City: {city}

CAMPAIGN REQUIREMENTS:
- Tone: {tone}
- Urgency level: {urgency}
- Language: {language}
- Regional elements: {regional}
- Variant number: {variant} (make it unique)
- Campaign type: {campaign_type}

Generate a compelling marketing message that:
1. Highlights the job market opportunity in {city}
2. Emphasizes {brand}'s value proposition
3. Uses the specified tone and urgency level
4. Includes relevant market statistics
5. Has a clear call-to-action
6. Incorporates regional elements: {regional}

Make this variant #{variant} unique with different angles, hooks, and messaging approaches."#;

/// Market framing appended to every channel prompt. Replace: {summary}, {hooks}
pub const MARKET_CONTEXT_BLOCK: &str = "MARKET INSIGHT: {summary}\nCAMPAIGN HOOKS: {hooks}";

/// Second-pass prompt for Hindi/multilingual requests. Replace: {excerpt}
pub const BILINGUAL_PROMPT_TEMPLATE: &str =
    "Translate key phrases to Hindi and add bilingual elements to: {excerpt}...";

/// Character limits the social prompt quotes per platform.
pub fn social_char_limit(platform: &str) -> u32 {
    match platform.to_lowercase().as_str() {
        "linkedin" => 3000,
        "instagram" => 2200,
        "facebook" => 63206,
        "twitter" => 280,
        _ => 1000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_char_limits() {
        assert_eq!(social_char_limit("LinkedIn"), 3000);
        assert_eq!(social_char_limit("twitter"), 280);
        assert_eq!(social_char_limit("mastodon"), 1000);
    }

    #[test]
    fn test_templates_carry_their_placeholders() {
        for template in [
            EMAIL_PROMPT_TEMPLATE,
            SOCIAL_PROMPT_TEMPLATE,
            SMS_PROMPT_TEMPLATE,
            CONTENT_PROMPT_TEMPLATE,
        ] {
            assert!(template.contains("{course}"));
            assert!(template.contains("{city}"));
            assert!(template.contains("{regional}"));
        }
    }
}
