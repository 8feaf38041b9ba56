// Reading and validating review text before it reaches the engine.
use std::fs;
use std::path::Path;

use crate::error::ReviewError;
use crate::Result;

/// File extensions accepted as review input.
pub const REVIEW_EXTENSIONS: &[&str] = &["txt", "md", "csv", "json", "pdf"];

pub fn is_review_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| REVIEW_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

pub fn read_review_file(path: &Path) -> Result<String> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    match ext {
        "txt" | "md" | "csv" | "json" => Ok(fs::read_to_string(path)?),
        "pdf" => pdf_extract::extract_text(path).map_err(|e| ReviewError::Pdf(e.to_string())),
        _ => Err(ReviewError::UnsupportedFormat(ext.to_string())),
    }
}

/// Trims the review and rejects it if fewer than `min_chars` characters remain.
pub fn validate_review(text: &str, min_chars: usize) -> Result<&str> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < min_chars {
        return Err(ReviewError::ReviewTooShort { len, min: min_chars });
    }
    Ok(trimmed)
}
