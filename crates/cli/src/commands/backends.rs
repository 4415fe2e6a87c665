//! `sves backends`: supported backend kinds and how each is reached.

use sves_config::BackendConfig;
use sves_core::BackendKind;
use sves_providers::ProviderFactory;

/// How a backend kind authenticates.
pub fn auth_label(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::AzureGov => "api-key header (required)",
        BackendKind::Vllm | BackendKind::CustomApi => "Bearer token (optional)",
        BackendKind::Ollama | BackendKind::LmStudio => "none",
    }
}

/// One table row per registered kind: kind, completion URL, readiness URL, auth.
pub fn rows(factory: &ProviderFactory) -> Vec<[String; 4]> {
    factory
        .kinds()
        .into_iter()
        .filter_map(|kind| {
            let defaults = BackendConfig::defaults_for(kind);
            let provider = factory.create(&defaults).ok()?;
            Some([
                kind.to_string(),
                provider.completion_url().to_string(),
                provider.health_url().to_string(),
                auth_label(kind).to_string(),
            ])
        })
        .collect()
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Supported Backends (default addresses)");
    println!("======================================");
    println!();
    for [kind, completion, health, auth] in rows(&ProviderFactory::with_defaults()) {
        println!("  {kind}");
        println!("    completion: {completion}");
        println!("    readiness:  {health}");
        println!("    auth:       {auth}");
    }
    println!();
    println!("  Select one with --backend, SVES_BACKEND, or `/use <kind>` in chat.");
    println!("  Azure Government reads its key from SVES_API_KEY or AZURE_OPENAI_API_KEY.");
    Ok(())
}
