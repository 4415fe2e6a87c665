//! `sves status`: active configuration and a live probe.

use sves_agent::ConnectionStatus;
use sves_config::AppConfig;

use super::open_session;

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(&config);
    let backend = session.config();

    println!("SVES Status");
    println!("===========");
    println!("  Config file:  {}", AppConfig::config_path().display());
    println!("  Backend:      {}", backend.kind);
    println!("  Base URL:     {}", backend.base_url);
    println!("  Model:        {}", backend.model);
    println!(
        "  API key:      {}",
        if backend.api_key().is_some() { "set" } else { "not set" }
    );
    println!("  Max tokens:   {}", backend.max_tokens);
    println!("  Temperature:  {}", backend.temperature);
    println!("  Timeout:      {}s", backend.timeout_secs);
    println!("  History cap:  {} turns", session.max_history_turns());

    if let Some(provider) = session.provider() {
        println!("  Completion:   {}", provider.completion_url());
        println!("  Readiness:    {}", provider.health_url());
    }

    let status = session.status().await;
    println!();
    match status {
        ConnectionStatus::Connected => println!("  Connected: backend answered its readiness probe"),
        ConnectionStatus::Disconnected => {
            println!("  Disconnected: no answer from {}", backend.base_url)
        }
        ConnectionStatus::Unconfigured => match backend.validate() {
            Err(e) => println!("  Unconfigured: {e}"),
            Ok(()) => println!("  Unconfigured"),
        },
    }

    if !AppConfig::config_path().exists() {
        println!("\n  No config file. Run `sves init` to create one.");
    }

    Ok(())
}
