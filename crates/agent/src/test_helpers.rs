//! Shared test helpers for responder and session tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use sves_core::backend::BackendKind;
use sves_core::error::ProviderError;
use sves_core::message::Message;
use sves_core::provider::Provider;

/// What one `generate` call received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub system_prompt: String,
    pub history_len: usize,
    pub history: Vec<Message>,
}

/// A provider that returns a sequence of scripted outcomes.
///
/// Each call to `generate` takes the next outcome in the queue.
/// Panics if more calls are made than outcomes provided.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    healthy: AtomicBool,
    kind: BackendKind,
    model: String,
}

impl ScriptedProvider {
    pub fn new(outcomes: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
            healthy: AtomicBool::new(true),
            kind: BackendKind::Ollama,
            model: "llama3.1:70b".into(),
        }
    }

    pub fn replying<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn failing(err: ProviderError) -> Self {
        Self::new(vec![Err(err)])
    }

    pub fn with_kind(mut self, kind: BackendKind, model: &str) -> Self {
        self.kind = kind;
        self.model = model.into();
        self
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("generate was never called")
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn completion_url(&self) -> &str {
        "http://scripted.test/v1/chat/completions"
    }

    fn health_url(&self) -> &str {
        "http://scripted.test/health"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.into(),
            system_prompt: system_prompt.into(),
            history_len: history.len(),
            history: history.to_vec(),
        });

        let count = self.call_count();
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedProvider: no more outcomes (call #{count})"))
    }

    async fn health_check(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}
