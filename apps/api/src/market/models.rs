use std::collections::BTreeMap;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// One row of the hiring table after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringRecord {
    pub company_name: String,
    pub city: String,
    pub industry: Option<String>,
    pub positions_available: u64,
    pub skills: Vec<String>,
    pub salary_range: Option<String>,
    pub hiring_urgency: Option<String>,
}

/// Ordered label → count mapping. Serializes as a JSON object whose key order is
/// the vector order (descending count, ties in first-seen order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedCounts(pub Vec<(String, usize)>);

impl RankedCounts {
    /// Counts labels and keeps the `limit` most frequent.
    /// The sort is stable, so equal counts keep first-encountered order.
    pub fn tally<I>(labels: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
        for label in labels {
            match index.get(&label) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(label.clone(), counts.len());
                    counts.push((label, 1));
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        RankedCounts(counts)
    }

    pub fn get(&self, label: &str) -> usize {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(l, _)| l.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for RankedCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Where a snapshot's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Dataset,
    Fallback,
}

/// Aggregated hiring statistics for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub city: String,
    pub positions_available: u64,
    pub companies_hiring: usize,
    pub top_skills: RankedCounts,
    pub salary_ranges: Vec<String>,
    pub hiring_urgency: BTreeMap<String, usize>,
    pub industries: BTreeMap<String, usize>,
    pub avg_salary: String,
    pub growth_rate: String,
    /// min(positions / 100, 10)
    pub market_score: f64,
    pub data_source: SnapshotSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrowthPotential {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRelevance {
    pub course: String,
    pub relevant_positions: usize,
    pub demand_skills: RankedCounts,
    /// min(relevant_positions / 50, 10)
    pub market_score: f64,
    pub growth_potential: GrowthPotential,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityPerformance {
    pub positions_available: u64,
    pub companies_hiring: usize,
    pub avg_positions_per_company: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiringTrends {
    pub city_performance: BTreeMap<String, CityPerformance>,
    pub industry_demand: BTreeMap<String, u64>,
    pub hiring_urgency: BTreeMap<String, usize>,
    pub total_positions: u64,
    pub total_companies: usize,
    pub skill_demand: RankedCounts,
}

/// Prompt-ready market framing for one city/course pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketContext {
    pub summary: String,
    pub campaign_hooks: Vec<String>,
    pub course_relevance: Option<CourseRelevance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    File,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStatus {
    pub source: DataSource,
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tally_orders_by_count_then_first_seen() {
        let counts = RankedCounts::tally(labels(&["Rust", "Go", "Python", "Go", "Python"]), 10);
        assert_eq!(
            counts.0,
            vec![
                ("Go".to_string(), 2),
                ("Python".to_string(), 2),
                ("Rust".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_tally_respects_limit() {
        let counts = RankedCounts::tally(labels(&["a", "b", "c", "d"]), 2);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.first(), Some("a"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let counts = RankedCounts(vec![("Zeta".into(), 5), ("Alpha".into(), 1)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"Zeta":5,"Alpha":1}"#);
    }

    #[test]
    fn test_get_missing_label_is_zero() {
        let counts = RankedCounts(vec![("Python".into(), 3)]);
        assert_eq!(counts.get("Python"), 3);
        assert_eq!(counts.get("Rust"), 0);
    }
}
