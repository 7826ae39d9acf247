use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by insta-insights.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// Reading the dataset file off disk failed.
    #[error("failed to read dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset text is not valid JSON.
    #[error("dataset is not valid JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The dataset parsed as JSON but is not a top-level array of posts.
    #[error("unexpected dataset shape: {0}")]
    DatasetShape(String),

    /// None of the candidate dataset locations held a file.
    #[error("dataset not found: {0}")]
    DatasetNotFound(PathBuf),

    /// The conversational endpoint was unreachable or answered abnormally.
    #[error("chat API error: {0}")]
    ChatApi(String),

    /// Something about the supplied configuration does not add up.
    #[error("configuration error: {0}")]
    Config(String),

    /// Raised by the terminal layer.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Raw I/O failure with no dataset path attached.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything a third-party crate surfaced through `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the insights crates.
pub type Result<T> = std::result::Result<T, InsightsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_read_mentions_path_and_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = InsightsError::DatasetRead {
            path: PathBuf::from("/some/refined_dataset.json"),
            source: cause,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("/some/refined_dataset.json"));
        assert!(rendered.contains("no such file"));
    }

    #[test]
    fn test_string_variants_render_their_detail() {
        let cases = [
            (
                InsightsError::DatasetShape("expected a top-level array".into()),
                "unexpected dataset shape: expected a top-level array",
            ),
            (
                InsightsError::ChatApi("HTTP 503".into()),
                "chat API error: HTTP 503",
            ),
            (
                InsightsError::Config("missing api token".into()),
                "configuration error: missing api token",
            ),
            (
                InsightsError::Terminal("crossterm failure".into()),
                "terminal error: crossterm failure",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_dataset_not_found_renders_path() {
        let err = InsightsError::DatasetNotFound(PathBuf::from("/missing/refined_dataset.json"));
        assert_eq!(
            err.to_string(),
            "dataset not found: /missing/refined_dataset.json"
        );
    }

    #[test]
    fn test_io_and_json_errors_convert() {
        let io: InsightsError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(io.to_string().contains("denied"));

        let json: InsightsError = serde_json::from_str::<serde_json::Value>("{invalid}")
            .unwrap_err()
            .into();
        assert!(json.to_string().contains("not valid JSON"));
    }
}
