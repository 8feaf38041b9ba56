// Context adjustment: intensifiers directly before a word scale it, negations shortly before flip it.
use super::lexicon::{Lexicon, Polarity};
use super::normalizer::Token;

/// How many preceding tokens are searched for a negation.
pub const NEGATION_WINDOW: usize = 3;
pub const INTENSIFIER_SCALE: f64 = 1.5;
/// Fixed amount a neutral-lexicon word adds to the neutral total.
pub const NEUTRAL_INCREMENT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordContribution {
    pub polarity: Polarity,
    pub intensified: bool,
    pub negated: bool,
    /// Signed score after scaling and sign flip. Zero for neutral and unknown words.
    pub value: f64,
}

/// Only the immediately preceding token counts. Positions past the end are never modified.
pub fn is_intensified(tokens: &[Token], i: usize, lexicon: &Lexicon) -> bool {
    i < tokens.len()
        && i.checked_sub(1)
            .and_then(|prev| tokens.get(prev))
            .is_some_and(|t| lexicon.is_intensifier(&t.text))
}

pub fn is_negated(tokens: &[Token], i: usize, lexicon: &Lexicon) -> bool {
    if i >= tokens.len() {
        return false;
    }
    let start = i.saturating_sub(NEGATION_WINDOW);
    tokens[start..i].iter().any(|t| lexicon.is_negation(&t.text))
}

/// Scale first, then flip, so "not very good" scores -1.5.
pub fn contribution(
    tokens: &[Token],
    i: usize,
    polarity: Polarity,
    lexicon: &Lexicon,
) -> WordContribution {
    let base = polarity.base_value();
    if base == 0.0 {
        return WordContribution {
            polarity,
            intensified: false,
            negated: false,
            value: 0.0,
        };
    }

    let intensified = is_intensified(tokens, i, lexicon);
    let negated = is_negated(tokens, i, lexicon);

    let mut value = base;
    if intensified {
        value *= INTENSIFIER_SCALE;
    }
    if negated {
        value = -value;
    }

    WordContribution {
        polarity,
        intensified,
        negated,
        value,
    }
}
