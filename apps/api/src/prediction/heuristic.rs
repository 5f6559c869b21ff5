use crate::generation::campaign::CampaignParameters;
use crate::market::MarketSnapshot;
use crate::prediction::{
    platform_multipliers, BusinessMetrics, PerformancePrediction, PerformancePredictor,
    PredictorBackend,
};

/// Starting rates before any multiplier. One table is chosen per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseRateTable {
    /// ctr 12%: the campaign-generation figures.
    Campaign,
    /// ctr 2.5%: the optimizer figures, shared with the learned backend.
    Optimizer,
}

impl BaseRateTable {
    pub fn rates(self) -> BusinessMetrics {
        let ctr = match self {
            BaseRateTable::Campaign => 0.12,
            BaseRateTable::Optimizer => 0.025,
        };
        BusinessMetrics {
            ctr,
            conversion_rate: 0.05,
            roas: 3.2,
            cost_per_conversion: 300.0,
        }
    }
}

struct CourseMultipliers {
    ctr: f64,
    conversion: f64,
    roas: f64,
    cost: f64,
}

const DEFAULT_COURSE: &str = "Data Science";

const COURSE_MULTIPLIERS: &[(&str, CourseMultipliers)] = &[
    ("AI/ML", CourseMultipliers { ctr: 1.4, conversion: 1.3, roas: 1.3, cost: 0.8 }),
    ("Generative AI", CourseMultipliers { ctr: 1.2, conversion: 1.1, roas: 1.1, cost: 0.9 }),
    ("Data Science", CourseMultipliers { ctr: 1.1, conversion: 1.0, roas: 1.0, cost: 1.0 }),
    ("MSc Finance", CourseMultipliers { ctr: 0.9, conversion: 0.9, roas: 0.9, cost: 1.1 }),
];

fn course_multipliers(course: &str) -> &'static CourseMultipliers {
    let lookup = |name: &str| {
        COURSE_MULTIPLIERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| m)
    };
    lookup(course)
        .or_else(|| lookup(DEFAULT_COURSE))
        .unwrap_or(&COURSE_MULTIPLIERS[2].1)
}

#[derive(Debug, Clone)]
pub struct HeuristicPredictor {
    table: BaseRateTable,
}

impl HeuristicPredictor {
    pub fn new(table: BaseRateTable) -> Self {
        Self { table }
    }

    /// Course row × market boost (`1 + score/20`) × platform row. Cost divides by the boost.
    pub fn estimate(&self, params: &CampaignParameters, market: &MarketSnapshot) -> BusinessMetrics {
        let base = self.table.rates();
        let course = course_multipliers(&params.course);
        let boost = 1.0 + market.market_score / 20.0;
        let (p_ctr, p_conv, p_roas) = params
            .channel
            .platform()
            .map(platform_multipliers)
            .unwrap_or((1.0, 1.0, 1.0));

        BusinessMetrics {
            ctr: base.ctr * course.ctr * boost * p_ctr,
            conversion_rate: base.conversion_rate * course.conversion * boost * p_conv,
            roas: base.roas * course.roas * boost * p_roas,
            cost_per_conversion: base.cost_per_conversion * course.cost / boost,
        }
    }
}

impl PerformancePredictor for HeuristicPredictor {
    fn predict(&self, params: &CampaignParameters, market: &MarketSnapshot) -> PerformancePrediction {
        self.estimate(params, market).format()
    }

    fn backend(&self) -> PredictorBackend {
        PredictorBackend::Heuristic
    }
}
