//! End-to-end tests for the SVES answer pipeline.
//!
//! These drive a `Session` against real HTTP backends served locally by axum,
//! from configuration through adapter selection to the wire request.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use serde_json::{Value, json};
use sves_agent::{ConnectionStatus, Session, build_system_prompt, knowledge_base};
use sves_config::BackendConfig;
use sves_core::BackendKind;

// ── Mock Backend ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Seen {
    paths: Vec<String>,
    bodies: Vec<Value>,
}

struct Backend {
    base_url: String,
    seen: Arc<Mutex<Seen>>,
}

impl Backend {
    fn chat_bodies(&self) -> Vec<Value> {
        self.seen.lock().unwrap().bodies.clone()
    }

    fn paths(&self) -> Vec<String> {
        self.seen.lock().unwrap().paths.clone()
    }
}

/// Serve `reply` on every POST and 200 on every GET.
async fn serve(reply: Value) -> Backend {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let state = (seen.clone(), reply);

    async fn handle(
        State((seen, reply)): State<(Arc<Mutex<Seen>>, Value)>,
        uri: Uri,
        body: axum::body::Bytes,
    ) -> (StatusCode, Json<Value>) {
        let mut seen = seen.lock().unwrap();
        seen.paths.push(uri.path().to_string());
        if body.is_empty() {
            return (StatusCode::OK, Json(json!({"status": "ok"})));
        }
        seen.bodies.push(serde_json::from_slice(&body).unwrap());
        (StatusCode::OK, Json(reply))
    }

    let app = Router::new().fallback(handle).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Backend {
        base_url: format!("http://{addr}"),
        seen,
    }
}

async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn ollama_at(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: base_url.into(),
        ..BackendConfig::defaults_for(BackendKind::Ollama)
    }
}

// ── E2E: Readiness ───────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_ollama_ready_server_is_connected() {
    let backend = serve(json!({})).await;
    let session = Session::new(ollama_at(&backend.base_url));

    assert_eq!(session.status().await, ConnectionStatus::Connected);
    assert_eq!(backend.paths(), vec!["/api/tags"]);
    assert_eq!(session.config().model, "llama3.1:70b");
}

#[tokio::test]
async fn e2e_refused_server_is_disconnected_and_ask_suggests_starting_it() {
    let mut session = Session::new(ollama_at(&refused_url().await));

    assert_eq!(session.status().await, ConnectionStatus::Disconnected);

    let err = session.ask("What is SCWO?").await.unwrap_err();
    assert_eq!(err.category(), "backend unavailable");
    assert!(err.to_string().contains("ollama serve"));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn e2e_generate_against_refused_server_is_connectivity_failure() {
    let config = ollama_at(&refused_url().await);
    let provider = sves_providers::create_provider(&config).unwrap();

    assert!(!provider.health_check().await);
    let err = sves_agent::respond("What is SCWO?", provider.as_ref(), &[])
        .await
        .unwrap_err();
    assert_eq!(err.category(), "backend unavailable");
    assert!(err.to_string().contains("ollama pull llama3.1:70b"));
}

// ── E2E: Full Conversation ───────────────────────────────────────────────

#[tokio::test]
async fn e2e_vllm_second_question_carries_history() {
    let backend = serve(json!({
        "choices": [{"message": {"role": "assistant", "content": "Fiber optic sensors, shut-off valves."}}]
    }))
    .await;
    let mut session = Session::new(BackendConfig {
        base_url: backend.base_url.clone(),
        ..BackendConfig::defaults_for(BackendKind::Vllm)
    });

    session.ask("What is SCWO?").await.unwrap();
    let answer = session.ask("Summarize the safety protocols").await.unwrap();
    assert_eq!(answer, "Fiber optic sensors, shut-off valves.");

    let bodies = backend.chat_bodies();
    assert_eq!(bodies.len(), 2);
    let messages = bodies[1]["messages"].as_array().unwrap();
    let roles: Vec<_> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    assert_eq!(messages[1]["content"], "What is SCWO?");
    assert_eq!(messages[3]["content"], "Summarize the safety protocols");
    assert_eq!(messages[0]["content"], build_system_prompt());

    assert_eq!(session.history().len(), 4);
}

#[tokio::test]
async fn e2e_switching_backends_mid_conversation() {
    let ollama = serve(json!({"message": {"role": "assistant", "content": "from ollama"}})).await;
    let lm_studio = serve(json!({
        "choices": [{"message": {"role": "assistant", "content": "from lm studio"}}]
    }))
    .await;

    let mut session = Session::new(ollama_at(&ollama.base_url));
    assert_eq!(session.ask("first").await.unwrap(), "from ollama");

    let mut next = session.config().clone();
    next.set("kind", "lm_studio").unwrap();
    next.set("url", &lm_studio.base_url).unwrap();
    session.apply(next).unwrap();

    assert_eq!(session.ask("second").await.unwrap(), "from lm studio");
    assert!(lm_studio.paths().contains(&"/v1/models".to_string()));
    let body = &lm_studio.chat_bodies()[0];
    assert_eq!(body["messages"].as_array().unwrap().len(), 4);
}

#[test]
fn e2e_context_bundle_is_stable() {
    assert_eq!(knowledge_base(), knowledge_base());
    assert!(build_system_prompt().contains("SIMIC VIRTUAL EXPERT SYSTEM - FOUNDATIONAL KNOWLEDGE BASE"));
}
