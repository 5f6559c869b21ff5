//! Market Data Store: city-keyed aggregates over the hiring table.
//!
//! Every query re-filters the raw rows. The table is immutable after startup,
//! so results only change when a new store is built.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::market::fallback::{self, DEFAULT_GROWTH_RATE, DEFAULT_SALARY};
use crate::market::models::{
    CityPerformance, CourseRelevance, DataSource, DataStatus, GrowthPotential, HiringRecord,
    HiringTrends, MarketContext, MarketSnapshot, RankedCounts, SnapshotSource,
};

const CITY_TOP_SKILLS: usize = 10;
const GLOBAL_TOP_SKILLS: usize = 20;
const MAX_SALARY_RANGES: usize = 5;
const MAX_CAMPAIGN_HOOKS: usize = 3;

/// Skills that count toward demand for each known course.
const COURSE_SKILLS: &[(&str, &[&str])] = &[
    (
        "AI/ML",
        &[
            "AI/ML",
            "Machine Learning",
            "Artificial Intelligence",
            "Data Science",
            "Python",
        ],
    ),
    (
        "Generative AI",
        &["AI/ML", "Machine Learning", "Python", "Deep Learning"],
    ),
    (
        "Data Science",
        &["Data Science", "Python", "Analytics", "Statistics", "R"],
    ),
    (
        "MSc Finance",
        &["Finance", "FinTech", "Banking", "Investment", "Risk Management"],
    ),
];

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("failed to open hiring data: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("hiring data has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("hiring data contains no usable rows")]
    Empty,
}

pub struct MarketDataStore {
    records: Vec<HiringRecord>,
    source: DataSource,
}

impl MarketDataStore {
    pub fn new(records: Vec<HiringRecord>, source: DataSource) -> Self {
        Self { records, source }
    }

    /// Loads the hiring CSV, substituting the seeded synthetic table on any failure.
    pub fn load(path: &Path) -> Self {
        match read_csv_file(path) {
            Ok(records) => {
                info!("Loaded hiring data: {} companies from {}", records.len(), path.display());
                Self::new(records, DataSource::File)
            }
            Err(e) => {
                warn!(
                    "Hiring data unavailable at {} ({e}); using synthetic table",
                    path.display()
                );
                Self::synthetic()
            }
        }
    }

    pub fn synthetic() -> Self {
        Self::new(fallback::synthetic_records(), DataSource::Synthetic)
    }

    pub fn status(&self) -> DataStatus {
        DataStatus {
            source: self.source,
            rows: self.records.len(),
        }
    }

    /// Direct lookup: `None` when no row's city contains `city` (case-insensitive).
    pub fn find(&self, city: &str) -> Option<MarketSnapshot> {
        let needle = city.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let rows: Vec<&HiringRecord> = self
            .records
            .iter()
            .filter(|r| r.city.to_lowercase().contains(&needle))
            .collect();
        if rows.is_empty() {
            return None;
        }
        Some(snapshot_from_rows(city.trim(), &rows))
    }

    /// Pipeline lookup: never fails, falls back to the hardcoded city table.
    pub fn lookup(&self, city: &str) -> MarketSnapshot {
        self.find(city).unwrap_or_else(|| {
            debug!("No hiring rows for '{city}', using fallback snapshot");
            fallback::snapshot(city)
        })
    }

    /// Global skill demand, top 20.
    pub fn skill_demand(&self) -> RankedCounts {
        RankedCounts::tally(
            self.records.iter().flat_map(|r| r.skills.iter().cloned()),
            GLOBAL_TOP_SKILLS,
        )
    }

    pub fn course_relevance(&self, course: &str) -> CourseRelevance {
        let relevant: &[&str] = COURSE_SKILLS
            .iter()
            .find(|(name, _)| *name == course)
            .map(|(_, skills)| *skills)
            .unwrap_or(&[]);
        let demand = self.skill_demand();

        let demand_skills = RankedCounts(
            relevant
                .iter()
                .map(|skill| (skill.to_string(), demand.get(skill)))
                .collect(),
        );
        let total: usize = demand_skills.0.iter().map(|(_, c)| c).sum();

        CourseRelevance {
            course: course.to_string(),
            relevant_positions: total,
            demand_skills,
            market_score: (total as f64 / 50.0).min(10.0),
            growth_potential: if total > 100 {
                GrowthPotential::High
            } else if total > 50 {
                GrowthPotential::Medium
            } else {
                GrowthPotential::Low
            },
        }
    }

    pub fn hiring_trends(&self) -> HiringTrends {
        let mut per_city: BTreeMap<String, (u64, usize)> = BTreeMap::new();
        let mut industry_demand: BTreeMap<String, u64> = BTreeMap::new();
        let mut hiring_urgency: BTreeMap<String, usize> = BTreeMap::new();

        for record in &self.records {
            let entry = per_city.entry(record.city.clone()).or_default();
            entry.0 = entry.0.saturating_add(record.positions_available);
            entry.1 += 1;
            if let Some(industry) = &record.industry {
                let demand = industry_demand.entry(industry.clone()).or_default();
                *demand = demand.saturating_add(record.positions_available);
            }
            if let Some(urgency) = &record.hiring_urgency {
                *hiring_urgency.entry(urgency.clone()).or_default() += 1;
            }
        }

        let city_performance = per_city
            .into_iter()
            .map(|(city, (positions, companies))| {
                let avg = (positions as f64 / companies as f64 * 10.0).round() / 10.0;
                (
                    city,
                    CityPerformance {
                        positions_available: positions,
                        companies_hiring: companies,
                        avg_positions_per_company: avg,
                    },
                )
            })
            .collect();

        HiringTrends {
            city_performance,
            industry_demand,
            hiring_urgency,
            total_positions: total_positions(&self.records),
            total_companies: self.records.len(),
            skill_demand: self.skill_demand(),
        }
    }

    /// Summary sentence and hooks the prompt builder embeds.
    pub fn market_context(&self, snapshot: &MarketSnapshot, course: Option<&str>) -> MarketContext {
        let course_relevance = course.map(|c| self.course_relevance(c));

        let mut summary = format!(
            "{} has {} open positions across {} companies. ",
            snapshot.city, snapshot.positions_available, snapshot.companies_hiring
        );
        if let Some(skill) = snapshot.top_skills.first() {
            summary.push_str(&format!("Top skill in demand: {skill}. "));
        }
        if let Some(relevance) = &course_relevance {
            summary.push_str(&format!(
                "Growth potential for this course: {:?}.",
                relevance.growth_potential
            ));
        }

        let mut hooks = Vec::new();
        if snapshot.positions_available > 1000 {
            hooks.push(format!(
                "Over {} job opportunities available",
                snapshot.positions_available
            ));
        }
        if snapshot.hiring_urgency.get("Critical").copied().unwrap_or(0) > 0 {
            hooks.push("Companies hiring urgently".to_string());
        }
        if let Some(skill) = snapshot.top_skills.first() {
            hooks.push(format!("{skill} professionals in high demand"));
        }
        if matches!(
            course_relevance.as_ref().map(|r| r.growth_potential),
            Some(GrowthPotential::High)
        ) {
            hooks.push("High growth potential in this field".to_string());
        }
        hooks.truncate(MAX_CAMPAIGN_HOOKS);

        MarketContext {
            summary: summary.trim_end().to_string(),
            campaign_hooks: hooks,
            course_relevance,
        }
    }
}

fn snapshot_from_rows(city: &str, rows: &[&HiringRecord]) -> MarketSnapshot {
    let positions = total_positions(rows.iter().copied());

    let top_skills = RankedCounts::tally(
        rows.iter().flat_map(|r| r.skills.iter().cloned()),
        CITY_TOP_SKILLS,
    );

    let salaries: Vec<String> = rows.iter().filter_map(|r| r.salary_range.clone()).collect();
    let avg_salary = RankedCounts::tally(salaries.iter().cloned(), 1)
        .first()
        .unwrap_or(DEFAULT_SALARY)
        .to_string();

    let mut hiring_urgency = BTreeMap::new();
    let mut industries = BTreeMap::new();
    for row in rows {
        if let Some(u) = &row.hiring_urgency {
            *hiring_urgency.entry(u.clone()).or_insert(0) += 1;
        }
        if let Some(i) = &row.industry {
            *industries.entry(i.clone()).or_insert(0) += 1;
        }
    }

    MarketSnapshot {
        city: city.to_string(),
        positions_available: positions,
        companies_hiring: rows.len(),
        top_skills,
        salary_ranges: salaries.into_iter().take(MAX_SALARY_RANGES).collect(),
        hiring_urgency,
        industries,
        avg_salary,
        growth_rate: DEFAULT_GROWTH_RATE.to_string(),
        market_score: fallback::market_score(positions),
        data_source: SnapshotSource::Dataset,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CSV loading
// ────────────────────────────────────────────────────────────────────────────

struct Columns {
    city: usize,
    company: Option<usize>,
    industry: Option<usize>,
    positions: Option<usize>,
    skills: Option<usize>,
    salary: Option<usize>,
    urgency: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, MarketDataError> {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let exact = |name: &str| lower.iter().position(|h| h == name);
        let containing = |needle: &str| lower.iter().position(|h| h.contains(needle));

        Ok(Columns {
            city: exact("city").ok_or(MarketDataError::MissingColumn("city"))?,
            company: exact("company_name").or_else(|| containing("company")),
            industry: exact("industry"),
            positions: exact("positions_available").or_else(|| containing("position")),
            skills: exact("skills_technologies").or_else(|| containing("skill")),
            salary: exact("salary_range").or_else(|| containing("salary")),
            urgency: exact("hiring_urgency").or_else(|| containing("urgency")),
        })
    }
}

fn read_csv_file(path: &Path) -> Result<Vec<HiringRecord>, MarketDataError> {
    read_csv(File::open(path)?)
}

/// Parses and cleans hiring rows. Header rows repeated in the body, blank cities
/// and cities shorter than three characters are dropped.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<HiringRecord>, MarketDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let Some(city) = field(Some(columns.city)) else {
            continue;
        };
        if city.chars().count() <= 2 || city.eq_ignore_ascii_case("city") {
            continue;
        }

        records.push(HiringRecord {
            company_name: field(columns.company).unwrap_or("Unknown").to_string(),
            city: city.to_string(),
            industry: field(columns.industry).map(str::to_string),
            positions_available: field(columns.positions)
                .map(parse_positions)
                .unwrap_or(0),
            skills: field(columns.skills).map(parse_skills).unwrap_or_default(),
            salary_range: field(columns.salary).map(str::to_string),
            hiring_urgency: field(columns.urgency).map(str::to_string),
        });
    }

    if records.is_empty() {
        return Err(MarketDataError::Empty);
    }
    Ok(records)
}

/// Upper bound for one row's positions; larger cells are data-entry errors.
const MAX_ROW_POSITIONS: u64 = 1_000_000;

fn parse_positions(raw: &str) -> u64 {
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| (v as u64).min(MAX_ROW_POSITIONS))
        .unwrap_or(0)
}

fn total_positions<'a, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'a HiringRecord>,
{
    records
        .into_iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.positions_available))
}

/// Splits a free-text skills cell on commas and title-cases each token.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(title_case)
        .collect()
}

/// Capitalises each word. All-caps words up to five letters (acronyms such as
/// "AI/ML" or "AWS") are kept as written.
fn title_case(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| {
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            let is_acronym = !letters.is_empty()
                && letters.len() <= 5
                && letters.iter().all(|c| c.is_uppercase());
            if is_acronym {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
company_name,city,industry,positions_available,skills_technologies,salary_range,hiring_urgency
Acme,Delhi NCR,IT Services,40,\"python, machine learning\",₹10-20 LPA,High
Globex,Bangalore,Fintech,25,\"Python, AI/ML, devops\",₹12-30 LPA,Critical
Initech,Bangalore,IT Services,abc,\"AI/ML, Python\",₹12-30 LPA,Medium
city,city,industry,1,x,y,z
Tiny,NA,IT Services,5,Python,₹1 LPA,Low
Blank,,IT Services,5,Python,₹1 LPA,Low
";

    fn sample_store() -> MarketDataStore {
        let records = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        MarketDataStore::new(records, DataSource::File)
    }

    #[test]
    fn test_csv_cleaning_drops_bad_rows() {
        let records = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].positions_available, 0, "non-numeric positions become 0");
        assert_eq!(records[0].skills, vec!["Python", "Machine Learning"]);
    }

    #[test]
    fn test_huge_positions_are_capped() {
        let csv = "\
company_name,city,industry,positions_available,skills_technologies,salary_range,hiring_urgency
A,Pune,IT,1e19,Python,₹10 LPA,High
B,Pune,IT,1e19,Python,₹10 LPA,High
";
        let store = MarketDataStore::new(read_csv(csv.as_bytes()).unwrap(), DataSource::File);
        let snap = store.lookup("Pune");
        assert_eq!(snap.positions_available, 2 * MAX_ROW_POSITIONS);
        assert_eq!(store.hiring_trends().total_positions, 2 * MAX_ROW_POSITIONS);

        let overflowing = HiringRecord {
            positions_available: u64::MAX,
            ..store.records[0].clone()
        };
        assert_eq!(total_positions([&overflowing, &overflowing]), u64::MAX);
    }

    #[test]
    fn test_title_case_keeps_acronyms() {
        assert_eq!(parse_skills("ai/ml, AI/ML, cloud computing"), vec!["Ai/ml", "AI/ML", "Cloud Computing"]);
        assert_eq!(title_case("AWS"), "AWS");
        assert_eq!(title_case("pYTHON"), "Python");
    }

    #[test]
    fn test_find_matches_substring_case_insensitively() {
        let store = sample_store();
        let snap = store.find("delhi").expect("Delhi should match Delhi NCR");
        assert_eq!(snap.positions_available, 40);
        assert_eq!(snap.companies_hiring, 1);
        assert_eq!(snap.data_source, SnapshotSource::Dataset);
    }

    #[test]
    fn test_city_snapshot_aggregates() {
        let store = sample_store();
        let snap = store.find("Bangalore").unwrap();
        assert_eq!(snap.positions_available, 25);
        assert_eq!(snap.companies_hiring, 2);
        assert_eq!(snap.top_skills.0[0], ("Python".to_string(), 2));
        assert_eq!(snap.top_skills.0[1], ("AI/ML".to_string(), 2));
        assert_eq!(snap.hiring_urgency.get("Critical"), Some(&1));
        assert_eq!(snap.avg_salary, "₹12-30 LPA");
        assert!((snap.market_score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_find_unknown_city_is_none_but_lookup_falls_back() {
        let store = sample_store();
        assert!(store.find("Nonexistent City").is_none());
        let snap = store.lookup("Nonexistent City");
        assert_eq!(snap.data_source, SnapshotSource::Fallback);
        assert_eq!(snap.positions_available, 1000);
    }

    #[test]
    fn test_blank_city_lookup_is_well_formed() {
        let store = sample_store();
        assert!(store.find("  ").is_none());
        let snap = store.lookup("");
        assert_eq!(snap.city, "");
        assert!(snap.market_score >= 0.0 && snap.market_score <= 10.0);
    }

    #[test]
    fn test_missing_file_uses_synthetic_table() {
        let store = MarketDataStore::load(Path::new("/definitely/not/here.csv"));
        assert_eq!(store.status().source, DataSource::Synthetic);
        assert_eq!(store.status().rows, 100);
        let again = MarketDataStore::load(Path::new("/definitely/not/here.csv"));
        assert_eq!(store.find("Pune"), again.find("Pune"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let store = MarketDataStore::load(file.path());
        assert_eq!(store.status().source, DataSource::File);
        assert_eq!(store.status().rows, 3);
    }

    #[test]
    fn test_missing_city_column_is_an_error() {
        let err = read_csv("company,positions\nAcme,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MarketDataError::MissingColumn("city")));
    }

    #[test]
    fn test_course_relevance_sums_relevant_skills() {
        let store = sample_store();
        let relevance = store.course_relevance("AI/ML");
        // AI/ML x2, Machine Learning x1, Python x3
        assert_eq!(relevance.relevant_positions, 6);
        assert_eq!(relevance.demand_skills.first(), Some("AI/ML"));
        assert_eq!(relevance.growth_potential, GrowthPotential::Low);

        let unknown = store.course_relevance("Pottery");
        assert_eq!(unknown.relevant_positions, 0);
        assert!(unknown.demand_skills.is_empty());
    }

    #[test]
    fn test_hiring_trends_totals() {
        let store = sample_store();
        let trends = store.hiring_trends();
        assert_eq!(trends.total_companies, 3);
        assert_eq!(trends.total_positions, 65);
        assert_eq!(trends.city_performance["Bangalore"].avg_positions_per_company, 12.5);
        assert_eq!(trends.industry_demand["IT Services"], 40);
    }

    #[test]
    fn test_market_context_hooks() {
        let store = sample_store();
        let snap = store.find("Bangalore").unwrap();
        let ctx = store.market_context(&snap, Some("AI/ML"));
        assert!(ctx.summary.starts_with("Bangalore has 25 open positions across 2 companies."));
        assert_eq!(
            ctx.campaign_hooks,
            vec![
                "Companies hiring urgently".to_string(),
                "Python professionals in high demand".to_string()
            ]
        );
    }
}
