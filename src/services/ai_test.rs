use super::*;
use std::sync::Mutex;

// =========================================================================
// MockLlm
// =========================================================================

enum Script {
    Chunks(Vec<Result<String, LlmError>>),
    FailToStart(LlmError),
}

struct MockLlm {
    script: Mutex<Option<Script>>,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl MockLlm {
    fn new(script: Script) -> Self {
        Self { script: Mutex::new(Some(script)), prompts: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl LlmStream for MockLlm {
    async fn stream(&self, prompt: &str, max_tokens: u32) -> Result<TextStream, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_owned(), max_tokens));
        match self.script.lock().unwrap().take() {
            Some(Script::Chunks(chunks)) => Ok(Box::pin(futures::stream::iter(chunks))),
            Some(Script::FailToStart(e)) => Err(e),
            None => Ok(Box::pin(futures::stream::empty())),
        }
    }
}

async fn collect_body(body: TextBody) -> Vec<String> {
    body.map(|chunk| match chunk {
        Ok(text) => text,
        Err(never) => match never {},
    })
    .collect()
    .await
}

// =========================================================================
// relay
// =========================================================================

#[tokio::test]
async fn relay_forwards_chunks_in_order() {
    let llm = Arc::new(MockLlm::new(Script::Chunks(vec![Ok("Hi".into()), Ok(" there".into())])));
    let body = relay(llm.clone(), "Answer briefly: hello", 250, "search").await;

    assert_eq!(collect_body(body).await, vec!["Hi".to_owned(), " there".to_owned()]);
    assert_eq!(
        llm.prompts.lock().unwrap().as_slice(),
        &[("Answer briefly: hello".to_owned(), 250)]
    );
}

#[tokio::test]
async fn relay_reports_start_failure_in_band() {
    let llm = Arc::new(MockLlm::new(Script::FailToStart(LlmError::ApiResponse {
        status: 401,
        body: "bad key".into(),
    })));
    let body = relay(llm, "p", 200, "summarize").await;

    assert_eq!(collect_body(body).await, vec!["[AI error: API response error: status 401]".to_owned()]);
}

#[tokio::test]
async fn relay_stops_after_mid_stream_error() {
    let llm = Arc::new(MockLlm::new(Script::Chunks(vec![
        Ok("partial".into()),
        Err(LlmError::ApiRequest("connection reset".into())),
        Ok("never sent".into()),
    ])));
    let body = relay(llm, "p", 200, "search").await;

    assert_eq!(
        collect_body(body).await,
        vec!["partial".to_owned(), "[AI error: API request failed: connection reset]".to_owned()]
    );
}

#[tokio::test]
async fn relay_empty_stream_yields_empty_body() {
    let llm = Arc::new(MockLlm::new(Script::Chunks(Vec::new())));
    let body = relay(llm, "p", 200, "search").await;
    assert!(collect_body(body).await.is_empty());
}

#[test]
fn error_chunk_wraps_display() {
    let err = LlmError::HttpClientBuild("tls backend missing".into());
    assert_eq!(error_chunk(&err), "[AI error: HTTP client build failed: tls backend missing]");
}

#[test]
fn upstream_body_exposes_provider_error_text() {
    let err = LlmError::ApiResponse { status: 429, body: "rate limit exceeded".into() };
    assert_eq!(upstream_body(&err), Some("rate limit exceeded"));
}

#[test]
fn upstream_body_absent_for_other_errors() {
    assert_eq!(upstream_body(&LlmError::ApiRequest("timeout".into())), None);
    assert_eq!(upstream_body(&LlmError::ApiResponse { status: 500, body: String::new() }), None);
}
