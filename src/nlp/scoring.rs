// Aggregation of per-word contributions into percentages, a label and a confidence.
use serde::{Deserialize, Serialize};

use super::context::{WordContribution, NEUTRAL_INCREMENT};
use super::lexicon::{Polarity, Sentiment};

const POLAR_CONFIDENCE_BASE: f64 = 50.0;
const POLAR_CONFIDENCE_SPAN: f64 = 45.0;
const POLAR_CONFIDENCE_CAP: f64 = 95.0;
const NEUTRAL_CONFIDENCE_BASE: f64 = 40.0;
const NEUTRAL_CONFIDENCE_SPAN: f64 = 50.0;
const NEUTRAL_CONFIDENCE_CAP: f64 = 90.0;

/// Raw running totals, all non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTotals {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl ScoreTotals {
    pub fn add(&mut self, contribution: &WordContribution) {
        match contribution.polarity {
            Polarity::Unknown => {}
            Polarity::Neutral => self.neutral += NEUTRAL_INCREMENT,
            Polarity::Positive | Polarity::Negative => {
                if contribution.value > 0.0 {
                    self.positive += contribution.value;
                } else {
                    self.negative += contribution.value.abs();
                }
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub totals: ScoreTotals,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

pub fn aggregate<'a, I>(contributions: I) -> Classification
where
    I: IntoIterator<Item = &'a WordContribution>,
{
    let mut totals = ScoreTotals::default();
    for contribution in contributions {
        totals.add(contribution);
    }
    classify(&totals)
}

/// Input with no lexicon matches at all is reported as 100% neutral.
pub fn percentages(totals: &ScoreTotals) -> (f64, f64, f64) {
    let total = totals.total();
    if total > 0.0 {
        (
            totals.positive / total * 100.0,
            totals.negative / total * 100.0,
            totals.neutral / total * 100.0,
        )
    } else {
        (0.0, 0.0, 100.0)
    }
}

/// A label wins only when its score is strictly greater than both others; any tie is neutral.
pub fn decide(totals: &ScoreTotals) -> Sentiment {
    let ScoreTotals {
        positive,
        negative,
        neutral,
    } = *totals;
    if positive > negative && positive > neutral {
        Sentiment::Positive
    } else if negative > positive && negative > neutral {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub fn confidence(totals: &ScoreTotals, sentiment: Sentiment) -> f64 {
    match sentiment {
        Sentiment::Positive | Sentiment::Negative => {
            // Non-zero here: the winning score is strictly greater than the others.
            let max = totals.positive.max(totals.negative).max(totals.neutral);
            let margin = (totals.positive - totals.negative).abs() / max;
            (POLAR_CONFIDENCE_BASE + margin * POLAR_CONFIDENCE_SPAN).min(POLAR_CONFIDENCE_CAP)
        }
        Sentiment::Neutral => {
            let total = totals.total();
            let share = if total > 0.0 { totals.neutral / total } else { 0.0 };
            (NEUTRAL_CONFIDENCE_BASE + share * NEUTRAL_CONFIDENCE_SPAN).min(NEUTRAL_CONFIDENCE_CAP)
        }
    }
}

pub fn classify(totals: &ScoreTotals) -> Classification {
    let (positive_pct, negative_pct, neutral_pct) = percentages(totals);
    let sentiment = decide(totals);
    Classification {
        totals: *totals,
        positive_pct,
        negative_pct,
        neutral_pct,
        sentiment,
        confidence: confidence(totals, sentiment),
    }
}
