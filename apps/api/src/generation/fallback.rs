//! Deterministic template content used when no model is configured or the
//! model call fails. Fragment choice depends only on `variant_number`.

use crate::generation::campaign::CampaignParameters;
use crate::generation::content::GeneratedContent;
use crate::generation::tone::ToneBand;
use crate::market::MarketSnapshot;

fn hooks(course: &str, city: &str, positions: u64) -> [String; 5] {
    [
        format!("🚀 BREAKING: {course} market explodes in {city}!"),
        format!("💼 {city} professionals: Your {course} moment is NOW!"),
        format!("⚡ {positions}+ {course} opportunities just opened in {city}"),
        format!("🎯 {course} boom hits {city} - Are you ready?"),
        format!("🌟 {city}'s {course} revolution starts with YOU!"),
    ]
}

const VALUE_PROPS: [&str; 5] = [
    "Industry-aligned curriculum designed by experts",
    "Job placement assistance with 500+ hiring partners",
    "Learn from industry leaders and practitioners",
    "Hands-on projects with real-world applications",
    "Career transformation in just 6-12 months",
];

const URGENCY_LINES: [&str; 5] = [
    "Limited seats available - Apply before they're gone!",
    "Early bird discount ends soon!",
    "Next batch starts in 2 weeks - Secure your spot!",
    "Join 50,000+ successful career changers!",
    "Don't let this opportunity pass you by!",
];

/// The three fragments picked for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragments {
    pub hook: String,
    pub value_prop: &'static str,
    pub urgency: &'static str,
}

pub fn fragments(course: &str, city: &str, positions: u64, variant_number: u32) -> Fragments {
    let idx = variant_number as usize % VALUE_PROPS.len();
    let [h0, h1, h2, h3, h4] = hooks(course, city, positions);
    let hook = match idx {
        0 => h0,
        1 => h1,
        2 => h2,
        3 => h3,
        _ => h4,
    };
    Fragments {
        hook,
        value_prop: VALUE_PROPS[idx],
        urgency: URGENCY_LINES[idx],
    }
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn body(band: ToneBand, f: &Fragments, p: &CampaignParameters, m: &MarketSnapshot, brand: &str) -> String {
    let (course, city) = (p.course.as_str(), p.city.as_str());
    let (positions, companies) = (m.positions_available, m.companies_hiring);
    match band {
        ToneBand::Formal => format!(
            "{hook}\n\nDear Professional,\n\nWe're excited to share that {companies} leading companies in {city} are actively seeking {course} professionals. With {positions}+ positions available, this represents a significant career opportunity.\n\n✅ {vp}\n✅ Comprehensive skill development program\n✅ Industry-recognized certification\n\nWe invite you to explore how {brand} can help you capitalize on this market demand.\n\nBest regards,\n{brand} Team",
            hook = f.hook,
            vp = f.value_prop,
        ),
        ToneBand::Urgent => format!(
            "🔥 {hook}\n\n⏰ URGENT ALERT: {positions}+ {course} jobs in {city} are being SNATCHED UP FAST!\n\n{companies} TOP COMPANIES are hiring RIGHT NOW:\n• Google • Microsoft • Amazon • Flipkart • And more!\n\n💰 Salaries up to ₹25 LPA!\n🚀 {vp}\n⚡ {urgency}\n\n❌ DON'T MISS OUT - These opportunities won't wait!\n\n👉 APPLY NOW: [Link]\n\n#UrgentHiring #{city_tag}Jobs #{course_tag}Careers",
            hook = f.hook,
            vp = f.value_prop,
            urgency = f.urgency,
            city_tag = compact(city),
            course_tag = compact(course),
        ),
        ToneBand::Balanced => format!(
            "{hook}\n\nHey {city} professionals! 👋\n\nThe {course} job market is absolutely booming right now! Here's what's happening:\n\n📊 Market Snapshot:\n• {positions}+ open positions\n• {companies} companies actively hiring\n• Average salary growth: 40-60%\n• High demand, low supply = YOUR opportunity!\n\n🎓 Why {brand}?\n✅ {vp}\n✅ Live classes with industry experts\n✅ 1:1 mentorship and career guidance\n✅ Job guarantee program*\n\n🎯 {urgency}\n\nReady to transform your career? Let's make it happen!\n\nApply now: [Link]",
            hook = f.hook,
            vp = f.value_prop,
            urgency = f.urgency,
        ),
    }
}

/// Builds template content for `params`. Pure: equal inputs give equal output.
pub fn fallback_content(params: &CampaignParameters, market: &MarketSnapshot, brand: &str) -> GeneratedContent {
    let band = ToneBand::from_scale(params.tone_scale);
    let f = fragments(
        &params.course,
        &params.city,
        market.positions_available,
        params.variant_number,
    );

    let social_post = format!(
        "{hook} {positions}+ jobs, {companies} companies hiring in {city}. {urgency} #{course_tag} #{city_tag}Jobs #{brand_tag}",
        hook = f.hook,
        positions = market.positions_available,
        companies = market.companies_hiring,
        city = params.city,
        urgency = f.urgency,
        course_tag = compact(&params.course).replace('/', ""),
        city_tag = compact(&params.city),
        brand_tag = compact(brand),
    );

    GeneratedContent::new(
        f.hook.clone(),
        body(band, &f, params, market, brand),
        social_post,
        band.call_to_action().to_string(),
        vec![
            f.value_prop.to_string(),
            format!(
                "Access to {}+ job opportunities in {}",
                market.positions_available, params.city
            ),
            "Industry-recognized certification".to_string(),
        ],
    )
    .finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::campaign::Channel;
    use crate::market::fallback::snapshot;

    fn params(variant_number: u32, tone_scale: u8) -> CampaignParameters {
        CampaignParameters {
            course: "AI/ML".into(),
            city: "Bangalore".into(),
            channel: Channel::Display,
            tone_scale,
            language: "English".into(),
            variant_number,
        }
    }

    #[test]
    fn test_same_variant_is_byte_identical() {
        let market = snapshot("Bangalore");
        let a = fallback_content(&params(1, 5), &market, "upGrad");
        let b = fallback_content(&params(1, 5), &market, "upGrad");
        assert_eq!(a, b);
    }

    #[test]
    fn test_adjacent_variants_differ() {
        let market = snapshot("Bangalore");
        let one = fragments("AI/ML", "Bangalore", market.positions_available, 1);
        let two = fragments("AI/ML", "Bangalore", market.positions_available, 2);
        assert_ne!(one.hook, two.hook);
        assert_ne!(one.value_prop, two.value_prop);
        assert_ne!(one.urgency, two.urgency);
    }

    #[test]
    fn test_variant_index_wraps_at_pool_size() {
        assert_eq!(
            fragments("AI/ML", "Pune", 10, 2),
            fragments("AI/ML", "Pune", 10, 7)
        );
    }

    #[test]
    fn test_tone_band_picks_template() {
        let market = snapshot("Bangalore");
        let formal = fallback_content(&params(1, 2), &market, "upGrad");
        let balanced = fallback_content(&params(1, 5), &market, "upGrad");
        let urgent = fallback_content(&params(1, 9), &market, "upGrad");

        assert!(formal.email_body.contains("Dear Professional"));
        assert!(formal.email_body.ends_with("upGrad Team"));
        assert!(balanced.email_body.contains("Hey Bangalore professionals!"));
        assert!(urgent.email_body.contains("URGENT ALERT"));
        assert!(urgent.email_body.contains("#AI/MLCareers"));
        assert_eq!(urgent.call_to_action, "Enroll Now - Limited Seats!");
    }

    #[test]
    fn test_subject_mentions_city_or_course_and_fits() {
        let market = snapshot("Bangalore");
        for variant in 1..=10 {
            let content = fallback_content(&params(variant, 5), &market, "upGrad");
            assert!(content.email_subject.chars().count() <= 60);
            assert!(
                content.email_subject.contains("Bangalore") || content.email_subject.contains("AI/ML")
            );
            assert!(content.social_post.chars().count() <= 280);
            assert_eq!(content.key_benefits.len(), 3);
        }
    }

    #[test]
    fn test_benefits_quote_market_positions() {
        let market = snapshot("Pune");
        let content = fallback_content(&params(1, 5), &market, "upGrad");
        assert_eq!(content.key_benefits[1], "Access to 1200+ job opportunities in Bangalore");
    }
}
