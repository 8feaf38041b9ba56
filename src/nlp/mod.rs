// NLP module for reviewsense
pub mod context;
pub mod lexicon;
pub mod normalizer;
pub mod report;
pub mod scoring;
pub mod sentiment;

pub use lexicon::{Lexicon, Polarity, Sentiment};
pub use sentiment::{analyze, analyze_with, SentimentResult};
