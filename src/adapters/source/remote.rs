//! Remote NER span source
//!
//! Posts the document text to a token-classification HTTP endpoint and
//! decodes the aggregated entity records it returns. The wire shape is
//! the HuggingFace pipeline output: `entity_group`, `score`, `word`,
//! `start`, `end` per record.

use super::SpanSource;
use crate::domain::{InferenceError, RawSpan};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use url::Url;

#[derive(Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

/// Rebase wire offsets from character counts onto byte offsets
///
/// The token-classification pipeline counts characters, while spans index
/// bytes internally. The two agree on ASCII but diverge after the first
/// multi-byte character, so CJK records would fail validation wholesale
/// without this pass. The claimed `word` disambiguates: a record whose
/// offsets already slice out its own word is left untouched, so sources
/// that emit byte offsets keep working.
fn rebase_offsets(text: &str, mut spans: Vec<RawSpan>) -> Vec<RawSpan> {
    let byte_of_char: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    for span in &mut spans {
        if text.get(span.start..span.end) == Some(span.text.as_str()) {
            continue;
        }
        if let (Some(&start), Some(&end)) =
            (byte_of_char.get(span.start), byte_of_char.get(span.end))
        {
            span.start = start;
            span.end = end;
        }
        // out-of-range offsets are left for span validation to reject
    }
    spans
}

/// Span source backed by a remote NER inference endpoint
pub struct RemoteNerSource {
    client: reqwest::Client,
    endpoint: Url,
    timeout_secs: u64,
}

impl RemoteNerSource {
    /// Create a source for the given endpoint
    ///
    /// The timeout applies to the whole request; model inference is slow,
    /// so callers configure this generously.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, InferenceError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| InferenceError::ConnectionFailed(format!("invalid endpoint: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            timeout_secs,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.timeout_secs)
        } else if err.is_decode() {
            InferenceError::InvalidResponse(err.to_string())
        } else {
            InferenceError::ConnectionFailed(err.to_string())
        }
    }
}

#[async_trait]
impl SpanSource for RemoteNerSource {
    async fn spans(&self, text: &str) -> Result<Vec<RawSpan>, InferenceError> {
        tracing::debug!(endpoint = %self.endpoint, chars = text.chars().count(), "requesting NER spans");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&NerRequest { text })
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let records = response
            .json::<Vec<RawSpan>>()
            .await
            .map_err(|e| self.map_error(e))?;
        Ok(rebase_offsets(text, records))
    }

    fn name(&self) -> &str {
        "remote-ner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decodes_pipeline_output_rebasing_char_offsets() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"entity_group": "PER", "score": 0.97, "word": "陳大文", "start": 1, "end": 4}]"#,
            )
            .create_async()
            .await;

        let text = "叫陳大文聽電話";
        let source = RemoteNerSource::new(&format!("{}/ner", server.url()), 30).unwrap();
        let spans = source.spans(text).await.unwrap();

        mock.assert_async().await;
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "PER");
        // chars 1..4 land at bytes 3..12 and survive span validation
        assert_eq!((spans[0].start, spans[0].end), (3, 12));
        assert!(crate::domain::Span::from_raw(&spans[0], text).is_ok());
    }

    #[test]
    fn test_rebase_converts_char_offsets() {
        let text = "叫陳大文聽電話";
        let spans = vec![RawSpan::new(1, 4, "PER", "陳大文", 0.97)];
        let out = rebase_offsets(text, spans);
        assert_eq!((out[0].start, out[0].end), (3, 12));
        assert_eq!(&text[out[0].start..out[0].end], "陳大文");
    }

    #[test]
    fn test_rebase_leaves_byte_offsets_untouched() {
        let text = "見陳大文 tel 91234567";
        // already byte offsets; the word slices out as-is
        let spans = vec![RawSpan::new(17, 25, "PHONE", "91234567", 0.9)];
        let out = rebase_offsets(text, spans);
        assert_eq!((out[0].start, out[0].end), (17, 25));
    }

    #[test]
    fn test_rebase_span_ending_at_text_end() {
        let text = "聯絡陳大文";
        let spans = vec![RawSpan::new(2, 5, "PER", "陳大文", 0.9)];
        let out = rebase_offsets(text, spans);
        assert_eq!((out[0].start, out[0].end), (6, 15));
    }

    #[test]
    fn test_rebase_out_of_range_left_for_validation() {
        let text = "短";
        let spans = vec![RawSpan::new(0, 9, "PER", "x", 0.9)];
        let out = rebase_offsets(text, spans);
        assert_eq!((out[0].start, out[0].end), (0, 9));
    }

    #[tokio::test]
    async fn test_http_error_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let source = RemoteNerSource::new(&format!("{}/ner", server.url()), 30).unwrap();
        let err = source.spans("text").await.unwrap_err();
        assert!(matches!(err, InferenceError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_invalid_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"oops\": true}")
            .create_async()
            .await;

        let source = RemoteNerSource::new(&format!("{}/ner", server.url()), 30).unwrap();
        let err = source.spans("text").await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(RemoteNerSource::new("not a url", 30).is_err());
    }
}
