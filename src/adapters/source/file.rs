//! File-backed span source
//!
//! Reads a JSON array of raw span records, in the same wire shape the
//! remote NER endpoint produces. Useful for replaying saved model output
//! through the pipeline, or piping another tool's predictions in.

use super::SpanSource;
use crate::domain::{InferenceError, RawSpan};
use async_trait::async_trait;
use std::path::PathBuf;

/// Span source backed by a JSON file
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SpanSource for FileSource {
    async fn spans(&self, _text: &str) -> Result<Vec<RawSpan>, InferenceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            InferenceError::ConnectionFailed(format!(
                "failed to read spans file {}: {e}",
                self.path.display()
            ))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| InferenceError::InvalidResponse(format!("invalid spans file: {e}")))
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_wire_shape_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"entity_group": "PER", "score": 0.98, "word": "陳大文", "start": 0, "end": 9}}]"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let spans = source.spans("陳大文...").await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "PER");
    }

    #[tokio::test]
    async fn test_missing_file_is_connection_failure() {
        let source = FileSource::new("/nonexistent/spans.json");
        let err = source.spans("text").await.unwrap_err();
        assert!(matches!(err, InferenceError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_response() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let source = FileSource::new(file.path());
        let err = source.spans("text").await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }
}
