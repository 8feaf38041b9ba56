// Human-readable explanation and keyword lists for a finished analysis.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::lexicon::{Polarity, Sentiment};

pub const MAX_KEY_WORDS: usize = 10;

/// Every lexicon match in text order, grouped by the word's own polarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundWords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

impl FoundWords {
    pub fn push(&mut self, polarity: Polarity, word: &str) {
        let list = match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
            Polarity::Neutral => &mut self.neutral,
            Polarity::Unknown => return,
        };
        list.push(word.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

fn distinct_prefix(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .filter(|w| seen.insert(*w))
        .take(MAX_KEY_WORDS)
        .cloned()
        .collect()
}

pub fn key_words(found: &FoundWords) -> KeyWords {
    KeyWords {
        positive: distinct_prefix(&found.positive),
        negative: distinct_prefix(&found.negative),
        neutral: distinct_prefix(&found.neutral),
    }
}

/// Counts are raw matches, before deduplication and truncation.
pub fn explanation(sentiment: Sentiment, found: &FoundWords) -> String {
    match sentiment {
        Sentiment::Positive => format!(
            "This review expresses a positive sentiment with {} positive words detected. \
             The review contains optimistic language and favorable opinions about the movie.",
            found.positive.len()
        ),
        Sentiment::Negative => format!(
            "This review expresses a negative sentiment with {} negative words detected. \
             The review contains critical language and unfavorable opinions about the movie.",
            found.negative.len()
        ),
        Sentiment::Neutral => format!(
            "This review expresses a neutral sentiment with balanced or moderate language. \
             The review contains {} sentiment words with no strong emotional leaning.",
            found.positive.len() + found.negative.len()
        ),
    }
}

pub fn summarize(found: &FoundWords, sentiment: Sentiment) -> (String, KeyWords) {
    (explanation(sentiment, found), key_words(found))
}
