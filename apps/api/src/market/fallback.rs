//! Data used when the hiring table is missing or has nothing for a city.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::market::models::{HiringRecord, MarketSnapshot, RankedCounts, SnapshotSource};

pub const SYNTHETIC_SEED: u64 = 42;
const SYNTHETIC_ROWS: usize = 100;

pub const DEFAULT_SALARY: &str = "₹12-18 LPA";
pub const DEFAULT_GROWTH_RATE: &str = "+15% YoY";

/// (city, positions, companies) used when a city has no matching rows.
const CITY_DEFAULTS: &[(&str, u64, usize)] = &[
    ("Bangalore", 2500, 85),
    ("Mumbai", 1800, 62),
    ("Delhi NCR", 2200, 78),
    ("Hyderabad", 1600, 55),
    ("Chennai", 1400, 48),
    ("Pune", 1200, 42),
    ("Ahmedabad", 800, 28),
    ("Kolkata", 900, 32),
];
const UNKNOWN_CITY_DEFAULT: (u64, usize) = (1000, 35);

const FALLBACK_SKILLS: &[&str] = &["Python", "Machine Learning", "Data Analysis"];

/// Plausible snapshot for `city` built from the hardcoded table.
pub fn snapshot(city: &str) -> MarketSnapshot {
    let (positions, companies) = CITY_DEFAULTS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(city.trim()))
        .map(|(_, p, c)| (*p, *c))
        .unwrap_or(UNKNOWN_CITY_DEFAULT);

    // Skill counts shrink by a third per rank so the ordering is meaningful.
    let top_skills = RankedCounts(
        FALLBACK_SKILLS
            .iter()
            .enumerate()
            .map(|(rank, skill)| (skill.to_string(), companies * (3 - rank) / 3))
            .collect(),
    );

    MarketSnapshot {
        city: city.trim().to_string(),
        positions_available: positions,
        companies_hiring: companies,
        top_skills,
        salary_ranges: vec![DEFAULT_SALARY.to_string()],
        hiring_urgency: BTreeMap::new(),
        industries: BTreeMap::new(),
        avg_salary: DEFAULT_SALARY.to_string(),
        growth_rate: DEFAULT_GROWTH_RATE.to_string(),
        market_score: market_score(positions),
        data_source: SnapshotSource::Fallback,
    }
}

pub fn market_score(positions: u64) -> f64 {
    (positions as f64 / 100.0).min(10.0)
}

/// Deterministic stand-in for the hiring table.
pub fn synthetic_records() -> Vec<HiringRecord> {
    let cities = ["Bangalore", "Mumbai", "Delhi NCR", "Hyderabad", "Chennai", "Pune"];
    let industries = [
        "IT Services",
        "Fintech",
        "E-commerce",
        "Healthcare",
        "Manufacturing",
    ];
    let skills = [
        "AI/ML",
        "Data Science",
        "Python",
        "DevOps",
        "Cloud Computing",
        "Cybersecurity",
    ];
    let urgencies = ["Low", "Medium", "High", "Critical"];

    let mut rng = StdRng::seed_from_u64(SYNTHETIC_SEED);
    (0..SYNTHETIC_ROWS)
        .map(|i| {
            let row_skills: Vec<String> = (0..3)
                .filter_map(|_| skills.choose(&mut rng))
                .map(|s| s.to_string())
                .collect();
            let low: u32 = rng.gen_range(8..25);
            let high: u32 = rng.gen_range(25..40);
            HiringRecord {
                company_name: format!("Company_{i}"),
                city: cities.choose(&mut rng).copied().unwrap_or("Bangalore").to_string(),
                industry: industries.choose(&mut rng).map(|s| s.to_string()),
                positions_available: rng.gen_range(1..100),
                skills: row_skills,
                salary_range: Some(format!("₹{low}-{high} LPA")),
                hiring_urgency: urgencies.choose(&mut rng).map(|s| s.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_city_uses_table_values() {
        let snap = snapshot("Bangalore");
        assert_eq!(snap.positions_available, 2500);
        assert_eq!(snap.companies_hiring, 85);
        assert_eq!(snap.market_score, 10.0);
        assert_eq!(snap.data_source, SnapshotSource::Fallback);
    }

    #[test]
    fn test_unknown_city_gets_generic_defaults() {
        let snap = snapshot("Atlantis");
        assert_eq!(snap.city, "Atlantis");
        assert_eq!(snap.positions_available, 1000);
        assert_eq!(snap.companies_hiring, 35);
        assert_eq!(snap.top_skills.first(), Some("Python"));
    }

    #[test]
    fn test_market_score_is_capped() {
        assert_eq!(market_score(0), 0.0);
        assert!((market_score(450) - 4.5).abs() < f64::EPSILON);
        assert_eq!(market_score(50_000), 10.0);
    }

    #[test]
    fn test_synthetic_records_are_deterministic() {
        let a = synthetic_records();
        let b = synthetic_records();
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);
        assert!(a.iter().all(|r| r.skills.len() == 3));
        assert!(a.iter().all(|r| (1..100).contains(&r.positions_available)));
    }
}
