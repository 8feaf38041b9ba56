// Sentiment analysis of a single review using the lexicon-based pipeline:
// normalize, classify and adjust each token, aggregate, then report.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::context::contribution;
use super::lexicon::{Lexicon, Polarity, Sentiment};
use super::normalizer::normalize;
use super::report::{summarize, FoundWords, KeyWords};
use super::scoring::{aggregate, ScoreTotals};

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// 0 to 95 for positive/negative, 0 to 90 for neutral.
    pub confidence: f64,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub raw_scores: ScoreTotals,
    pub explanation: String,
    pub key_words: KeyWords,
    pub word_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Analyze a review with the built-in lexicon. Total over all strings.
pub fn analyze(text: &str) -> SentimentResult {
    analyze_with(Lexicon::builtin(), text)
}

pub fn analyze_with(lexicon: &Lexicon, text: &str) -> SentimentResult {
    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    debug!(%preview, "starting sentiment analysis");

    let tokens = normalize(text);
    debug!(tokens = tokens.len(), "normalized review");

    let mut contributions = Vec::with_capacity(tokens.len());
    let mut found = FoundWords::default();

    for (i, token) in tokens.iter().enumerate() {
        let polarity = lexicon.classify(&token.text);
        if polarity == Polarity::Unknown {
            continue;
        }
        found.push(polarity, &token.text);

        let word = contribution(&tokens, i, polarity, lexicon);
        if word.intensified {
            trace!(word = %token.text, "intensified by previous word");
        }
        if word.negated {
            trace!(word = %token.text, "negated by preceding negation word");
        }
        contributions.push(word);
    }

    let classification = aggregate(&contributions);
    debug!(
        positive = classification.totals.positive,
        negative = classification.totals.negative,
        neutral = classification.totals.neutral,
        "raw scores"
    );

    let (explanation, key_words) = summarize(&found, classification.sentiment);

    debug!(
        sentiment = %classification.sentiment,
        confidence = classification.confidence,
        "final analysis"
    );

    SentimentResult {
        sentiment: classification.sentiment,
        confidence: classification.confidence,
        positive_pct: classification.positive_pct,
        negative_pct: classification.negative_pct,
        neutral_pct: classification.neutral_pct,
        raw_scores: classification.totals,
        explanation,
        key_words,
        word_count: tokens.len(),
        timestamp: Utc::now(),
    }
}
