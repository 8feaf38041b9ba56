// Command-line front end: analyze reviews, run batches over a directory, inspect the history.
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use reviewsense::config::Config;
use reviewsense::history::{HistoryStore, JsonFileHistory, StoredReview};
use reviewsense::input::{is_review_file, read_review_file, validate_review};
use reviewsense::{analyze, Sentiment, SentimentResult};

#[derive(Parser)]
#[command(name = "reviewsense", about = "Lexicon-based sentiment analysis for movie reviews")]
struct Cli {
    /// History file (overrides REVIEWSENSE_HISTORY)
    #[arg(long, global = true)]
    history: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one review given inline, from a file, or on stdin
    Analyze {
        text: Option<String>,
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_save: bool,
    },
    /// Analyze every review file under a directory
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        /// Write a JSON report here instead of printing a summary
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        save: bool,
    },
    History {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    Stats {
        #[arg(long)]
        json: bool,
    },
    Clear,
}

#[derive(Serialize, Deserialize, Debug)]
struct BatchEntry {
    path: String,
    review: String,
    result: SentimentResult,
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral => Color::Yellow,
    }
}

fn write_label(out: &mut impl WriteColor, sentiment: Sentiment) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(sentiment_color(sentiment))).set_bold(true))?;
    write!(out, "{}", sentiment.label().to_uppercase())?;
    out.reset()
}

fn keyword_line(words: &[String]) -> String {
    if words.is_empty() {
        String::from("(none)")
    } else {
        words.join(", ")
    }
}

fn print_result(out: &mut impl WriteColor, result: &SentimentResult) -> io::Result<()> {
    write!(out, "Sentiment:  ")?;
    write_label(out, result.sentiment)?;
    writeln!(out, " ({:.0}% confidence)", result.confidence)?;
    writeln!(
        out,
        "Scores:     positive {:.0}% | negative {:.0}% | neutral {:.0}%",
        result.positive_pct, result.negative_pct, result.neutral_pct
    )?;
    writeln!(out, "Words:      {}", result.word_count)?;
    writeln!(out, "\n{}\n", result.explanation)?;
    writeln!(out, "Positive words ({}): {}", result.key_words.positive.len(), keyword_line(&result.key_words.positive))?;
    writeln!(out, "Negative words ({}): {}", result.key_words.negative.len(), keyword_line(&result.key_words.negative))?;
    writeln!(out, "Neutral words ({}):  {}", result.key_words.neutral.len(), keyword_line(&result.key_words.neutral))?;
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut s = String::new();
    io::stdin().read_to_string(&mut s)?;
    Ok(s)
}

fn analyze_command(
    config: &Config,
    store: &dyn HistoryStore,
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
    no_save: bool,
) -> Result<()> {
    let raw = match (text, file) {
        (Some(t), _) => t,
        (None, Some(p)) => read_review_file(&p)?,
        (None, None) => read_stdin()?,
    };
    let review = validate_review(&raw, config.min_review_chars)?;
    let result = analyze(review);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        print_result(&mut stdout, &result)?;
    }

    if !no_save {
        save_to_history(store, review, &result);
    }
    Ok(())
}

/// History is best-effort: a failed save is logged and never hides the analysis.
fn save_to_history(store: &dyn HistoryStore, review: &str, result: &SentimentResult) -> bool {
    match store.record(review, result) {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "failed to save review to history");
            false
        }
    }
}

fn collect_review_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_review_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Analyzes every review file under `dir` in parallel. Files that cannot be read are skipped.
fn analyze_dir(dir: &Path, min_chars: usize) -> Result<Vec<BatchEntry>> {
    if !dir.is_dir() {
        return Err(anyhow!("not a directory: {}", dir.display()));
    }
    let files = collect_review_files(dir);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let entries: Vec<BatchEntry> = files
        .par_iter()
        .filter_map(|p| {
            let entry = match read_review_file(p) {
                Ok(text) => match validate_review(&text, min_chars) {
                    Ok(review) => Some(BatchEntry {
                        path: p.to_string_lossy().to_string(),
                        review: review.to_string(),
                        result: analyze(review),
                    }),
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "skipping review");
                        None
                    }
                },
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "failed to read review");
                    None
                }
            };
            pb.inc(1);
            entry
        })
        .collect();

    pb.finish_with_message("analyzing reviews");
    Ok(entries)
}

fn batch_command(
    config: &Config,
    store: &dyn HistoryStore,
    dir: &Path,
    out: Option<&Path>,
    save: bool,
) -> Result<()> {
    let entries = analyze_dir(dir, config.min_review_chars)?;

    match out {
        Some(path) => {
            let fout = File::create(path)?;
            serde_json::to_writer_pretty(fout, &entries)?;
            println!("Wrote {} results to {}", entries.len(), path.display());
        }
        None => {
            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            for entry in &entries {
                write_label(&mut stdout, entry.result.sentiment)?;
                writeln!(stdout, " {:>3.0}%  {}", entry.result.confidence, entry.path)?;
            }
        }
    }

    if save {
        let saved = entries
            .iter()
            .filter(|entry| save_to_history(store, &entry.review, &entry.result))
            .count();
        if saved < entries.len() {
            warn!(saved, total = entries.len(), "some batch results were not saved");
        }
    }
    Ok(())
}

fn print_history(out: &mut impl WriteColor, reviews: &[StoredReview]) -> io::Result<()> {
    if reviews.is_empty() {
        writeln!(out, "No reviews analyzed yet.")?;
        return Ok(());
    }
    for review in reviews {
        let preview: String = review.review.chars().take(60).collect();
        write!(out, "{}  ", review.timestamp.format("%Y-%m-%d %H:%M"))?;
        write_label(out, review.sentiment)?;
        writeln!(out, " {:>3.0}%  {}", review.confidence, preview)?;
    }
    Ok(())
}

fn history_command(store: &dyn HistoryStore, limit: Option<usize>, json: bool) -> Result<()> {
    let mut reviews = store.list_all()?;
    if let Some(n) = limit {
        reviews.truncate(n);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&reviews)?);
    } else {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        print_history(&mut stdout, &reviews)?;
    }
    Ok(())
}

fn stats_command(store: &dyn HistoryStore, json: bool) -> Result<()> {
    let stats = store.stats()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total:              {}", stats.total);
        println!("Positive:           {}", stats.positive);
        println!("Negative:           {}", stats.negative);
        println!("Neutral:            {}", stats.neutral);
        println!("Average confidence: {:.0}%", stats.average_confidence);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env_or_default();
    if let Some(path) = cli.history {
        config.history_path = path;
    }
    config.validate()?;

    let store = JsonFileHistory::new(&config.history_path, config.history_limit);

    match cli.command {
        Commands::Analyze { text, file, json, no_save } => {
            analyze_command(&config, &store, text, file, json, no_save)?
        }
        Commands::Batch { dir, out, save } => {
            batch_command(&config, &store, &dir, out.as_deref(), save)?
        }
        Commands::History { limit, json } => history_command(&store, limit, json)?,
        Commands::Stats { json } => stats_command(&store, json)?,
        Commands::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewsense::history::MemoryHistory;
    use termcolor::NoColor;
    use tempfile::TempDir;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>,
    {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from(["reviewsense", "analyze", "great film", "--no-save"]).unwrap();
        match cli.command {
            Commands::Analyze { text, file, json, no_save } => {
                assert_eq!(text.as_deref(), Some("great film"));
                assert!(file.is_none());
                assert!(!json);
                assert!(no_save);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_cli_rejects_text_and_file() {
        let parsed = Cli::try_parse_from(["reviewsense", "analyze", "text", "--file", "r.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_global_history_flag() {
        let cli = Cli::try_parse_from(["reviewsense", "stats", "--history", "/tmp/h.json"]).unwrap();
        assert_eq!(cli.history, Some(PathBuf::from("/tmp/h.json")));
    }

    #[test]
    fn test_print_result() {
        let result = analyze("This movie was absolutely fantastic! Amazing cinematography!");
        let text = render(|out| print_result(out, &result));
        assert!(text.contains("Sentiment:  POSITIVE (95% confidence)"));
        assert!(text.contains("positive 100% | negative 0% | neutral 0%"));
        assert!(text.contains("Positive words (3): fantastic, amazing, cinematography"));
        assert!(text.contains("Negative words (0): (none)"));
    }

    #[test]
    fn test_print_history_empty() {
        let text = render(|out| print_history(out, &[]));
        assert_eq!(text, "No reviews analyzed yet.\n");
    }

    #[test]
    fn test_print_history_rows() {
        let result = analyze("dull and boring");
        let stored = StoredReview::from_result("dull and boring", &result);
        let text = render(|out| print_history(out, &[stored]));
        assert!(text.contains("NEGATIVE"));
        assert!(text.contains("95%"));
        assert!(text.contains("dull and boring"));
    }

    #[test]
    fn test_analyze_command_records_history() -> Result<()> {
        let config = Config::default();
        let store = MemoryHistory::default();
        analyze_command(&config, &store, Some("  A stunning, gripping film.  ".into()), None, true, false)?;

        let reviews = store.list_all()?;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].review, "A stunning, gripping film.");
        assert_eq!(reviews[0].sentiment, Sentiment::Positive);
        Ok(())
    }

    #[test]
    fn test_analyze_command_no_save() -> Result<()> {
        let store = MemoryHistory::default();
        analyze_command(&Config::default(), &store, Some("A stunning film".into()), None, true, true)?;
        assert!(store.list_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_analyze_command_rejects_short_review() {
        let store = MemoryHistory::default();
        let err = analyze_command(&Config::default(), &store, Some("meh".into()), None, true, false);
        assert!(err.is_err());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_analyze_command_survives_corrupt_history() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"[{"id":"x","rev"#)?;
        let store = JsonFileHistory::new(&path, 50);

        analyze_command(
            &Config::default(),
            &store,
            Some("A stunning, gripping film.".into()),
            None,
            true,
            false,
        )?;

        // the broken file is left for the user to inspect or clear
        assert_eq!(std::fs::read_to_string(&path)?, r#"[{"id":"x","rev"#);
        Ok(())
    }

    #[test]
    fn test_save_to_history_reports_failure() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json")?;
        let result = analyze("great acting");

        assert!(!save_to_history(&JsonFileHistory::new(&path, 50), "great acting", &result));
        assert!(save_to_history(&MemoryHistory::default(), "great acting", &result));
        Ok(())
    }

    #[test]
    fn test_batch_command_survives_corrupt_history() -> Result<()> {
        let dir = TempDir::new()?;
        let reviews = dir.path().join("reviews");
        std::fs::create_dir(&reviews)?;
        std::fs::write(reviews.join("one.txt"), "A wonderful, moving story.")?;
        let history = dir.path().join("history.json");
        std::fs::write(&history, "[")?;
        let out = dir.path().join("report.json");

        let store = JsonFileHistory::new(&history, 50);
        batch_command(&Config::default(), &store, &reviews, Some(&out), true)?;
        assert!(out.exists());
        Ok(())
    }

    #[test]
    fn test_analyze_dir() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("a.txt"), "Absolutely brilliant acting.")?;
        std::fs::create_dir(dir.path().join("nested"))?;
        std::fs::write(dir.path().join("nested").join("b.md"), "Boring, slow and predictable.")?;
        std::fs::write(dir.path().join("short.txt"), "ok")?;
        std::fs::write(dir.path().join("image.bin"), [0u8, 159, 146, 150])?;

        let entries = analyze_dir(dir.path(), 10)?;
        assert_eq!(entries.len(), 2);
        assert!(entries[0].path.ends_with("a.txt"));
        assert_eq!(entries[0].result.sentiment, Sentiment::Positive);
        assert!(entries[1].path.ends_with("b.md"));
        assert_eq!(entries[1].result.sentiment, Sentiment::Negative);
        Ok(())
    }

    #[test]
    fn test_analyze_dir_missing() {
        assert!(analyze_dir(Path::new("/nonexistent/reviews"), 10).is_err());
    }

    #[test]
    fn test_batch_command_writes_report_and_saves() -> Result<()> {
        let dir = TempDir::new()?;
        let reviews = dir.path().join("reviews");
        std::fs::create_dir(&reviews)?;
        std::fs::write(reviews.join("one.txt"), "A wonderful, moving story.")?;
        std::fs::write(reviews.join("two.txt"), "The plot was okay, fairly average.")?;
        let out = dir.path().join("report.json");

        let store = MemoryHistory::default();
        batch_command(&Config::default(), &store, &reviews, Some(&out), true)?;

        let f = File::open(&out)?;
        let entries: Vec<BatchEntry> = serde_json::from_reader(f)?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].result.sentiment, Sentiment::Neutral);
        assert_eq!(store.stats()?.total, 2);
        Ok(())
    }
}
