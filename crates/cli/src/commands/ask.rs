//! `sves ask`: one question, answer on stdout.

use sves_config::AppConfig;

use super::open_session;

pub async fn run(config: AppConfig, question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&config);

    eprint!("  Analyzing with SVES...");
    let outcome = session.ask(question).await;
    eprint!("\r                          \r");

    match outcome {
        Ok(answer) => {
            println!("{answer}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            Err(format!("request failed ({})", e.category()).into())
        }
    }
}
