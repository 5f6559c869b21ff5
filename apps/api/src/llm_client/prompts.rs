// Shared prompt fragments used by every campaign prompt.
// Channel-specific templates live in generation/prompts.rs.

/// Output contract the section parser relies on. Labels must start their own line.
pub const SECTION_FORMAT_INSTRUCTION: &str = "\
FORMAT YOUR RESPONSE EXACTLY AS (each label at the start of its own line):
SUBJECT: [email subject line, max 60 characters]
BODY: [email body, 150-200 words]
SOCIAL: [social media post, max 280 characters, with hashtags]
CTA: [call to action]
BENEFITS: [benefit 1] | [benefit 2] | [benefit 3]";

/// Brand voice shared by all prompts. Replace `{brand}` before sending.
pub const BRAND_GUIDELINES: &str = "\
BRAND GUIDELINES:
- Brand: {brand}
- Tone: professional, motivational, career-focused
- Target: working professionals seeking career advancement
- Key message: Upskill for Success";
