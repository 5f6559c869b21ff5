//! Labelled training rows: a CSV loader and a seeded synthetic generator.

use std::f64::consts::PI;
use std::path::Path;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Deserialize;

use crate::prediction::features::FeatureInput;

pub const SYNTHETIC_ROWS: usize = 500;
pub const SYNTHETIC_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub features: FeatureInput,
    pub performance_score: f64,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    brand_id: String,
    content_theme: String,
    visual_style: String,
    target_emotion: String,
    campaign_type: String,
    platform: String,
    target_city: String,
    target_age_group: String,
    character_count: f64,
    readability_score: f64,
    brand_consistency_score: f64,
    accessibility_score: f64,
    performance_score: f64,
}

impl From<CsvRow> for TrainingRow {
    fn from(r: CsvRow) -> Self {
        TrainingRow {
            features: FeatureInput {
                brand_id: r.brand_id,
                content_theme: r.content_theme,
                visual_style: r.visual_style,
                target_emotion: r.target_emotion,
                campaign_type: r.campaign_type,
                platform: r.platform,
                target_city: r.target_city,
                target_age_group: r.target_age_group,
                character_count: r.character_count,
                readability_score: r.readability_score,
                brand_consistency_score: r.brand_consistency_score,
                accessibility_score: r.accessibility_score,
            },
            performance_score: r.performance_score,
        }
    }
}

/// Reads labelled rows; the header must name all twelve features plus `performance_score`.
pub fn load_csv(path: &Path) -> Result<Vec<TrainingRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    reader
        .deserialize::<CsvRow>()
        .map(|row| row.map(TrainingRow::from))
        .collect()
}

const BRANDS: [&str; 4] = ["upgrad", "byju", "unacademy", "vedantu"];
const THEMES: [&str; 5] = [
    "AI/ML Skills",
    "Career Growth",
    "Job Security",
    "Salary Boost",
    "Skill Development",
];
const STYLES: [&str; 4] = ["Modern", "Professional", "Creative", "Minimalist"];
const EMOTIONS: [&str; 4] = ["Motivation", "Urgency", "Confidence", "Aspiration"];
const CAMPAIGN_TYPES: [&str; 3] = ["Email", "Social Media", "Display Ads"];
const PLATFORMS: [&str; 6] = ["Facebook", "Instagram", "LinkedIn", "Twitter", "YouTube", "Google Ads"];
const CITIES: [&str; 6] = ["Bangalore", "Mumbai", "Delhi NCR", "Hyderabad", "Chennai", "Pune"];
const AGE_GROUPS: [&str; 4] = ["22-28", "28-35", "35-42", "42-50"];

fn factor(table: &[(&str, f64)], key: &str) -> f64 {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(1.0)
}

/// Noise-free score implied by the feature interactions.
pub fn underlying_score(f: &FeatureInput) -> f64 {
    let mut score = 5.0;
    score *= factor(
        &[("upgrad", 1.2), ("byju", 1.0), ("unacademy", 0.9), ("vedantu", 0.8)],
        &f.brand_id,
    );
    score *= factor(
        &[
            ("Job Security", 1.3),
            ("Career Growth", 1.2),
            ("AI/ML Skills", 1.1),
            ("Salary Boost", 1.1),
            ("Skill Development", 1.0),
        ],
        &f.content_theme,
    );
    score *= factor(
        &[
            ("Instagram", 1.4),
            ("LinkedIn", 1.3),
            ("YouTube", 1.2),
            ("Facebook", 1.1),
            ("Google Ads", 1.1),
            ("Twitter", 0.9),
        ],
        &f.platform,
    );
    score *= factor(
        &[
            ("Hyderabad", 1.2),
            ("Bangalore", 1.15),
            ("Chennai", 1.1),
            ("Delhi NCR", 1.05),
            ("Mumbai", 1.0),
            ("Pune", 0.95),
        ],
        &f.target_city,
    );
    score *= factor(
        &[("35-42", 1.1), ("28-35", 1.1), ("22-28", 1.0), ("42-50", 0.9)],
        &f.target_age_group,
    );

    if f.readability_score > 8.0 {
        score *= 1.1;
    }
    if f.brand_consistency_score > 9.0 {
        score *= 1.15;
    }
    if f.accessibility_score > 9.0 {
        score *= 1.05;
    }
    if (150.0..=200.0).contains(&f.character_count) {
        score *= 1.1;
    } else if f.character_count < 100.0 || f.character_count > 250.0 {
        score *= 0.9;
    }
    score
}

/// Box-Muller draw from N(0, sd).
fn gaussian(rng: &mut StdRng, sd: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    sd * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

/// `n` rows with scores from `underlying_score` plus N(0, 0.3) noise, clamped to 1..=10.
pub fn synthetic_rows(n: usize, seed: u64) -> Vec<TrainingRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let features = FeatureInput {
                brand_id: pick(&mut rng, &BRANDS),
                content_theme: pick(&mut rng, &THEMES),
                visual_style: pick(&mut rng, &STYLES),
                target_emotion: pick(&mut rng, &EMOTIONS),
                campaign_type: pick(&mut rng, &CAMPAIGN_TYPES),
                platform: pick(&mut rng, &PLATFORMS),
                target_city: pick(&mut rng, &CITIES),
                target_age_group: pick(&mut rng, &AGE_GROUPS),
                character_count: rng.gen_range(50..300) as f64,
                readability_score: rng.gen_range(6.0..12.0),
                brand_consistency_score: rng.gen_range(7.0..10.0),
                accessibility_score: rng.gen_range(8.0..10.0),
            };
            let noisy = underlying_score(&features) + gaussian(&mut rng, 0.3);
            TrainingRow {
                performance_score: noisy.clamp(1.0, 10.0),
                features,
            }
        })
        .collect()
}
