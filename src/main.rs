//! Ranklist Engine - Command Line Entry Point
//!
//! Reads a ranklist document, computes it and prints the result as JSON.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ranklist_engine::{config::CONFIG, models::RanklistDocument, RanklistService};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: ranklist-engine <document.json>")?;

    tracing::info!("Loading ranklist from {}", path);
    let document = load_document(Path::new(&path))?;

    let outcome = RanklistService::process_with_config(&document, &CONFIG)?;
    for failure in &outcome.series_failures {
        tracing::warn!("{}", failure);
    }

    println!("{}", serde_json::to_string_pretty(&outcome.document)?);

    Ok(())
}

/// Read and decode a ranklist document from disk
fn load_document(path: &Path) -> anyhow::Result<RanklistDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "contest": {{ "title": "Loader", "startAt": "2020-01-01T00:00:00Z", "duration": [1, "h"] }},
                "problems": [],
                "series": [],
                "rows": []
            }}"#
        )
        .unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.contest.title.fallback(), "Loader");
    }

    #[test]
    fn test_load_document_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
