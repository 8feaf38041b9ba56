//! Past analyses, newest first, capped at a fixed number of entries.
//!
//! The engine never touches this module; callers record a [`SentimentResult`] after
//! receiving it.
use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use uuid::Uuid;

use crate::nlp::{Sentiment, SentimentResult};
use crate::Result;

pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReview {
    pub id: String,
    pub review: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl StoredReview {
    pub fn from_result(review: &str, result: &SentimentResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            review: review.to_string(),
            sentiment: result.sentiment,
            confidence: result.confidence,
            timestamp: result.timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub average_confidence: f64,
}

impl ReviewStats {
    pub fn from_reviews(reviews: &[StoredReview]) -> Self {
        let mut stats = Self {
            total: reviews.len(),
            ..Self::default()
        };
        for review in reviews {
            match review.sentiment {
                Sentiment::Positive => stats.positive += 1,
                Sentiment::Negative => stats.negative += 1,
                Sentiment::Neutral => stats.neutral += 1,
            }
        }
        if !reviews.is_empty() {
            stats.average_confidence =
                reviews.iter().map(|r| r.confidence).sum::<f64>() / reviews.len() as f64;
        }
        stats
    }
}

pub trait HistoryStore: Send + Sync {
    /// Stores the analysis at the front of the history and returns the stored record.
    fn record(&self, review: &str, result: &SentimentResult) -> Result<StoredReview>;

    /// Newest first.
    fn list_all(&self) -> Result<Vec<StoredReview>>;

    fn clear(&self) -> Result<()>;

    fn stats(&self) -> Result<ReviewStats> {
        Ok(ReviewStats::from_reviews(&self.list_all()?))
    }
}

/// Process-local history, lost on exit.
pub struct MemoryHistory {
    reviews: Mutex<VecDeque<StoredReview>>,
    limit: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl MemoryHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            reviews: Mutex::new(VecDeque::with_capacity(limit)),
            limit,
        }
    }
}

impl HistoryStore for MemoryHistory {
    fn record(&self, review: &str, result: &SentimentResult) -> Result<StoredReview> {
        let stored = StoredReview::from_result(review, result);
        let mut reviews = self.reviews.lock();
        reviews.push_front(stored.clone());
        reviews.truncate(self.limit);
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<StoredReview>> {
        Ok(self.reviews.lock().iter().cloned().collect())
    }

    fn clear(&self) -> Result<()> {
        self.reviews.lock().clear();
        Ok(())
    }
}

/// History persisted as a JSON array in a single file.
pub struct JsonFileHistory {
    path: PathBuf,
    limit: usize,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
            lock: Mutex::new(()),
        }
    }

    /// A missing file is an empty history; a malformed one is an error.
    fn load(&self) -> Result<Vec<StoredReview>> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let reviews: Vec<StoredReview> = serde_json::from_slice(&bytes)?;
                debug!(count = reviews.len(), path = %self.path.display(), "loaded stored reviews");
                Ok(reviews)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling temp file and renames it over the target, so an interrupted
    /// save never leaves a truncated history behind.
    fn save(&self, reviews: &[StoredReview]) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, reviews)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileHistory {
    fn record(&self, review: &str, result: &SentimentResult) -> Result<StoredReview> {
        let _guard = self.lock.lock();
        let stored = StoredReview::from_result(review, result);
        let mut reviews = self.load()?;
        reviews.insert(0, stored.clone());
        reviews.truncate(self.limit);
        self.save(&reviews)?;
        info!(
            sentiment = %stored.sentiment,
            total = reviews.len(),
            "review saved"
        );
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<StoredReview>> {
        let _guard = self.lock.lock();
        let mut reviews = self.load()?;
        reviews.truncate(self.limit);
        Ok(reviews)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!(path = %self.path.display(), "all stored reviews cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::analyze;
    use crate::ReviewError;
    use tempfile::TempDir;

    fn record_all(store: &dyn HistoryStore, reviews: &[&str]) -> Result<()> {
        for review in reviews {
            store.record(review, &analyze(review))?;
        }
        Ok(())
    }

    #[test]
    fn test_memory_history_newest_first() -> Result<()> {
        let store = MemoryHistory::default();
        record_all(&store, &["great film", "awful film", "okay film"])?;

        let reviews = store.list_all()?;
        let texts: Vec<&str> = reviews.iter().map(|r| r.review.as_str()).collect();
        assert_eq!(texts, vec!["okay film", "awful film", "great film"]);
        assert_eq!(reviews[0].sentiment, Sentiment::Neutral);
        Ok(())
    }

    #[test]
    fn test_memory_history_cap() -> Result<()> {
        let store = MemoryHistory::new(3);
        record_all(&store, &["one good", "two good", "three good", "four good"])?;

        let reviews = store.list_all()?;
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].review, "four good");
        assert_eq!(reviews[2].review, "two good");
        Ok(())
    }

    #[test]
    fn test_default_cap_is_fifty() -> Result<()> {
        let store = MemoryHistory::default();
        for i in 0..60 {
            let review = format!("review {i} was good");
            store.record(&review, &analyze(&review))?;
        }
        let reviews = store.list_all()?;
        assert_eq!(reviews.len(), HISTORY_LIMIT);
        assert_eq!(reviews[0].review, "review 59 was good");
        Ok(())
    }

    #[test]
    fn test_stats() -> Result<()> {
        let store = MemoryHistory::default();
        assert_eq!(store.stats()?, ReviewStats::default());

        record_all(&store, &["good", "bad", "terrible", "good bad"])?;
        let stats = store.stats()?;
        assert_eq!(stats.total, 4);
        assert_eq!(stats.positive, 1);
        assert_eq!(stats.negative, 2);
        assert_eq!(stats.neutral, 1);
        // 95 + 95 + 95 + 40
        assert!((stats.average_confidence - 81.25).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_memory_clear() -> Result<()> {
        let store = MemoryHistory::default();
        record_all(&store, &["good"])?;
        store.clear()?;
        assert!(store.list_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_stored_review_copies_result() {
        let result = analyze("absolutely stunning");
        let stored = StoredReview::from_result("absolutely stunning", &result);
        assert_eq!(stored.sentiment, result.sentiment);
        assert_eq!(stored.confidence, result.confidence);
        assert_eq!(stored.timestamp, result.timestamp);
        assert!(Uuid::parse_str(&stored.id).is_ok());
    }

    #[test]
    fn test_json_history_persists() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("history.json");

        let store = JsonFileHistory::new(&path, HISTORY_LIMIT);
        assert!(store.list_all()?.is_empty());
        record_all(&store, &["great film", "dull film"])?;
        assert!(path.exists());

        let reopened = JsonFileHistory::new(&path, HISTORY_LIMIT);
        let reviews = reopened.list_all()?;
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].review, "dull film");
        assert_eq!(reviews[0].sentiment, Sentiment::Negative);
        assert_eq!(reviews[1].sentiment, Sentiment::Positive);
        Ok(())
    }

    #[test]
    fn test_json_history_cap() -> Result<()> {
        let dir = TempDir::new()?;
        let store = JsonFileHistory::new(dir.path().join("history.json"), 2);
        record_all(&store, &["good", "bad", "okay"])?;

        let reviews = store.list_all()?;
        let texts: Vec<&str> = reviews.iter().map(|r| r.review.as_str()).collect();
        assert_eq!(texts, vec!["okay", "bad"]);
        Ok(())
    }

    #[test]
    fn test_json_history_clear() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("history.json");
        let store = JsonFileHistory::new(&path, HISTORY_LIMIT);

        // clearing an empty history is fine
        store.clear()?;

        record_all(&store, &["good"])?;
        store.clear()?;
        assert!(!path.exists());
        assert_eq!(store.stats()?.total, 0);
        Ok(())
    }

    #[test]
    fn test_json_history_save_leaves_no_temp_files() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("history.json");
        let store = JsonFileHistory::new(&path, HISTORY_LIMIT);
        record_all(&store, &["good", "bad"])?;

        let names: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("history.json")]);
        Ok(())
    }

    #[test]
    fn test_json_history_corrupt_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("history.json");
        fs::write(&path, "not json")?;

        let store = JsonFileHistory::new(&path, HISTORY_LIMIT);
        assert!(matches!(store.list_all(), Err(ReviewError::Serialization(_))));
        Ok(())
    }
}
