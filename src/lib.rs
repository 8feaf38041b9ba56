//! Lexicon-based sentiment scoring for short reviews.
//!
//! The engine in [`nlp`] is a pure function from text to [`SentimentResult`]. The
//! [`history`] store and the [`input`] helpers are the collaborators the CLI wires
//! around it.
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod nlp;

pub use error::{Result, ReviewError};
pub use nlp::{analyze, Sentiment, SentimentResult};
