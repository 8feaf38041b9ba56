// Static word lists for movie reviews and the polarity lookup over them.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const POSITIVE_WORDS: &[&str] = &[
    // general
    "good", "great", "excellent", "amazing", "fantastic", "wonderful", "brilliant", "outstanding",
    "superb", "magnificent", "spectacular", "marvelous", "incredible", "awesome", "perfect",
    "beautiful", "stunning", "remarkable", "exceptional", "impressive", "extraordinary",
    // movie-specific
    "captivating", "engaging", "thrilling", "compelling", "mesmerizing", "breathtaking",
    "riveting", "gripping", "enthralling", "fascinating", "intriguing", "suspenseful",
    "hilarious", "entertaining", "enjoyable", "delightful", "charming", "witty",
    "clever", "smart", "intelligent", "moving", "touching",
    "emotional", "powerful", "intense", "dramatic", "epic", "masterpiece",
    "flawless", "polished", "refined", "sophisticated", "elegant", "artistic",
    // performance and craft
    "stellar", "phenomenal", "talented", "skilled", "convincing", "believable",
    "natural", "charismatic", "magnetic", "dynamic", "versatile", "nuanced",
    "cinematography", "directing", "screenplay", "score", "soundtrack", "editing",
    "production", "visuals", "effects", "performances", "acting", "cast",
    // reactions
    "love", "adore", "enjoy", "appreciate", "admire", "praise", "recommend",
    "satisfy", "pleased", "happy", "excited", "thrilled", "amazed", "impressed",
    "inspired", "uplifted", "entertained", "engaged", "absorbed", "immersed",
];

const NEGATIVE_WORDS: &[&str] = &[
    // general
    "bad", "terrible", "awful", "horrible", "disgusting", "disappointing", "poor",
    "worse", "worst", "pathetic", "ridiculous", "stupid", "dumb", "idiotic",
    "useless", "pointless", "meaningless", "worthless", "waste", "garbage",
    // movie-specific
    "boring", "dull", "tedious", "slow", "dragging", "lengthy", "overlong",
    "confusing", "convoluted", "messy", "incoherent", "nonsensical", "illogical",
    "predictable", "cliched", "unoriginal", "formulaic", "generic", "stale",
    "cheesy", "corny", "cringe", "awkward", "forced", "artificial", "fake",
    "unconvincing", "unbelievable", "unrealistic", "implausible", "contrived",
    // performance and craft
    "overacting", "underacting", "miscast", "wooden", "stiff", "lifeless",
    "flat", "shallow", "superficial", "weak",
    "sloppy", "rushed", "lazy", "careless", "amateur", "unprofessional",
    "cheap", "tacky", "gaudy", "tasteless", "vulgar",
    // reactions
    "hate", "dislike", "despise", "regret", "disappointed", "frustrated",
    "annoyed", "irritated", "bored", "uninterested", "indifferent", "cold",
    "empty", "hollow", "soulless", "heartless", "disturbing", "uncomfortable",
];

const NEUTRAL_WORDS: &[&str] = &[
    "okay", "fine", "decent", "average", "mediocre", "ordinary", "standard",
    "typical", "normal", "regular", "common", "usual", "expected",
    "moderate", "fair", "reasonable", "adequate", "sufficient", "acceptable",
    "watchable", "passable", "tolerable", "bearable", "mixed", "varied",
    "balanced", "neutral", "middle", "center", "between",
    "some", "certain", "particular", "specific", "general", "overall",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "incredibly", "absolutely", "completely", "totally",
    "utterly", "entirely", "thoroughly", "perfectly", "exceptionally",
    "remarkably", "particularly", "especially", "really", "truly", "genuinely",
    "quite", "rather", "fairly", "pretty", "highly", "deeply", "severely",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nowhere", "nobody", "none", "neither",
    "without", "hardly", "barely", "scarcely", "rarely", "seldom", "little",
    "few", "less", "least", "minus", "lacking", "missing", "absent",
];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let lexicon = Lexicon::from_lists(
        POSITIVE_WORDS,
        NEGATIVE_WORDS,
        NEUTRAL_WORDS,
        INTENSIFIERS,
        NEGATIONS,
    );
    debug_assert!(
        lexicon.overlaps().is_empty(),
        "built-in word sets overlap: {:?}",
        lexicon.overlaps()
    );
    lexicon
});

/// Overall label of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lexicon membership of a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
    /// In none of the word lists; invisible to scoring and reporting.
    Unknown,
}

impl Polarity {
    pub fn base_value(self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
            Polarity::Neutral | Polarity::Unknown => 0.0,
        }
    }
}

/// A word found in more than one of the lexicon's sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub word: String,
    pub first: &'static str,
    pub second: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    neutral: HashSet<String>,
    intensifiers: HashSet<String>,
    negations: HashSet<String>,
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Lexicon {
    /// The movie-review lexicon baked into the binary.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn from_lists(
        positive: &[&str],
        negative: &[&str],
        neutral: &[&str],
        intensifiers: &[&str],
        negations: &[&str],
    ) -> Self {
        Self {
            positive: to_set(positive),
            negative: to_set(negative),
            neutral: to_set(neutral),
            intensifiers: to_set(intensifiers),
            negations: to_set(negations),
        }
    }

    /// First match wins, in the order positive, negative, neutral.
    pub fn classify(&self, word: &str) -> Polarity {
        if self.positive.contains(word) {
            Polarity::Positive
        } else if self.negative.contains(word) {
            Polarity::Negative
        } else if self.neutral.contains(word) {
            Polarity::Neutral
        } else {
            Polarity::Unknown
        }
    }

    pub fn is_intensifier(&self, word: &str) -> bool {
        self.intensifiers.contains(word)
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    fn named_sets(&self) -> [(&'static str, &HashSet<String>); 5] {
        [
            ("positive", &self.positive),
            ("negative", &self.negative),
            ("neutral", &self.neutral),
            ("intensifiers", &self.intensifiers),
            ("negations", &self.negations),
        ]
    }

    /// Every word shared by two sets, sorted for stable output. Empty for a well-formed lexicon.
    pub fn overlaps(&self) -> Vec<Overlap> {
        let sets = self.named_sets();
        let mut overlaps = Vec::new();
        for (i, (first, a)) in sets.iter().enumerate() {
            for (second, b) in sets.iter().skip(i + 1) {
                for word in a.intersection(b) {
                    overlaps.push(Overlap {
                        word: word.clone(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        overlaps.sort_by(|x, y| {
            (x.first, x.second, &x.word).cmp(&(y.first, y.second, &y.word))
        });
        overlaps
    }
}
