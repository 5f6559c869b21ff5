//! Image prompt construction and the branded template used when no image
//! service answers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandPalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

pub const PALETTE: BrandPalette = BrandPalette {
    primary: "#007BFF",
    secondary: "#FFFFFF",
    accent: "#FF6B35",
};

const NEGATIVE_PROMPT: &str = "blurry, low quality, unprofessional, cluttered, cartoon, anime, \
text errors, watermarks, signatures, poor lighting, amateur photography, distorted faces";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    #[default]
    SocialMedia,
    EmailHeader,
    DisplayAd,
    Story,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub aspect_ratio: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImageType {
    /// Delivery size of the finished asset.
    pub fn dimensions(self) -> Dimensions {
        let (aspect_ratio, width, height) = match self {
            ImageType::SocialMedia => ("1:1", 1024, 1024),
            ImageType::EmailHeader => ("16:9", 1920, 1080),
            ImageType::DisplayAd => ("4:3", 1200, 900),
            ImageType::Story => ("9:16", 1080, 1920),
        };
        Dimensions {
            aspect_ratio,
            width,
            height,
        }
    }

    /// Closest size the image model accepts.
    pub fn generation_size(self) -> (u32, u32) {
        match self {
            ImageType::SocialMedia => (1024, 1024),
            ImageType::EmailHeader => (1344, 768),
            ImageType::DisplayAd => (1152, 896),
            ImageType::Story => (768, 1344),
        }
    }

    fn framing(self) -> &'static str {
        match self {
            ImageType::SocialMedia => "Aspect ratio: Square (1:1) for social media",
            ImageType::EmailHeader => "Aspect ratio: Wide banner (16:9)",
            ImageType::DisplayAd => "Aspect ratio: Standard display (4:3)",
            ImageType::Story => "Aspect ratio: Vertical story (9:16)",
        }
    }
}

fn default_course() -> String {
    "Professional Development".to_string()
}

fn default_city() -> String {
    "India".to_string()
}

fn default_theme() -> String {
    "Career Growth".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRequest {
    #[serde(default = "default_course")]
    pub course: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub image_type: ImageType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePrompt {
    pub prompt: String,
    pub negative_prompt: &'static str,
}

pub fn build_prompt(request: &ImageRequest, brand: &str) -> ImagePrompt {
    let parts = [
        format!("Professional marketing poster for {brand} education platform"),
        format!("Theme: {} in {}", request.theme, request.course),
        format!("Setting: Modern office environment in {}, India", request.city),
        "People: Diverse Indian professionals, confident and successful looking".to_string(),
        "Age group: 25-40 years, business attire".to_string(),
        "Mood: Inspiring, professional, aspirational, motivational".to_string(),
        format!(
            "Colors: Primary blue ({}) and orange ({}) accents",
            PALETTE.primary, PALETTE.accent
        ),
        "Style: Clean, modern, high-quality, professional photography style".to_string(),
        "Background: Subtle tech/data visualization elements, clean gradient".to_string(),
        "Lighting: Professional, well-lit, corporate photography lighting".to_string(),
        "Quality: High resolution, 4K, marketing-ready".to_string(),
        "Composition: Rule of thirds, professional framing".to_string(),
        "Text space: Leave space for text overlay in bottom third".to_string(),
        request.image_type.framing().to_string(),
    ];

    ImagePrompt {
        prompt: parts.join(" | "),
        negative_prompt: NEGATIVE_PROMPT,
    }
}

/// Layout a designer or renderer can fill in when no generated image exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDescriptor {
    pub brand: String,
    pub headline: String,
    pub subheadline: String,
    pub call_to_action: &'static str,
    /// Vertical gradient, top colour first.
    pub gradient: [&'static str; 2],
    pub palette: BrandPalette,
    pub dimensions: Dimensions,
}

pub fn template(request: &ImageRequest, brand: &str) -> TemplateDescriptor {
    TemplateDescriptor {
        brand: brand.to_string(),
        headline: format!("Transform Your Career with {}", request.course),
        subheadline: format!("Opportunities in {}", request.city),
        call_to_action: "Enroll Now - Limited Seats!",
        gradient: [PALETTE.primary, PALETTE.accent],
        palette: PALETTE,
        dimensions: request.image_type.dimensions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(image_type: ImageType) -> ImageRequest {
        ImageRequest {
            course: "Data Science".into(),
            city: "Pune".into(),
            theme: "Salary Boost".into(),
            image_type,
        }
    }

    #[test]
    fn test_prompt_carries_brand_theme_and_colours() {
        let p = build_prompt(&request(ImageType::EmailHeader), "upGrad");
        assert!(p.prompt.starts_with("Professional marketing poster for upGrad"));
        assert!(p.prompt.contains("Theme: Salary Boost in Data Science"));
        assert!(p.prompt.contains("#007BFF"));
        assert!(p.prompt.contains("Wide banner (16:9)"));
        assert!(p.negative_prompt.contains("watermarks"));
    }

    #[test]
    fn test_request_defaults() {
        let r: ImageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(r.course, "Professional Development");
        assert_eq!(r.image_type, ImageType::SocialMedia);
        let r: ImageRequest = serde_json::from_str(r#"{"image_type":"display_ad"}"#).unwrap();
        assert_eq!(r.image_type.dimensions().aspect_ratio, "4:3");
    }

    #[test]
    fn test_template_uses_delivery_dimensions() {
        let t = template(&request(ImageType::Story), "upGrad");
        assert_eq!(t.headline, "Transform Your Career with Data Science");
        assert_eq!(t.subheadline, "Opportunities in Pune");
        assert_eq!((t.dimensions.width, t.dimensions.height), (1080, 1920));
    }
}
