//! `sves chat`: interactive expert chat.

use std::io::Write;

use sves_agent::{ConnectionStatus, Session};
use sves_config::AppConfig;
use sves_core::BackendKind;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{describe, open_session};

const EXAMPLE_QUERIES: [&str; 3] = [
    "Design an RTCR experiment for olivine at 450°C and 30 MPa",
    "Analyze cuttings transport for Cosmos X-9 at 3,000 m depth",
    "What are the SCC risks for Hastelloy C-276 in chloride-rich SCW?",
];

/// One line of chat input.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    Ask(String),
    Clear,
    Status,
    Config(Vec<(String, String)>),
    Use(String),
    Help,
    Exit,
    Invalid(String),
}

/// Interpret one trimmed, non-empty input line.
pub fn parse_line(line: &str) -> ChatCommand {
    let line = line.trim();
    match line {
        "exit" | "quit" | "/exit" | "/quit" | ":q" => return ChatCommand::Exit,
        "/clear" => return ChatCommand::Clear,
        "/status" => return ChatCommand::Status,
        "/help" | "/?" => return ChatCommand::Help,
        _ => {}
    }

    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match command {
        "/use" => {
            let kind = rest.trim();
            return if kind.is_empty() {
                ChatCommand::Invalid("usage: /use <kind>".into())
            } else {
                ChatCommand::Use(kind.to_string())
            };
        }
        "/config" => {
            let mut pairs = Vec::new();
            for token in rest.split_whitespace() {
                match token.split_once('=') {
                    Some((key, value)) if !key.is_empty() => {
                        pairs.push((key.to_string(), value.to_string()))
                    }
                    _ => {
                        return ChatCommand::Invalid(format!("expected key=value, got '{token}'"));
                    }
                }
            }
            return if pairs.is_empty() {
                ChatCommand::Invalid("usage: /config key=value [key=value ...]".into())
            } else {
                ChatCommand::Config(pairs)
            };
        }
        _ => {}
    }

    if line.starts_with('/') {
        return ChatCommand::Invalid(format!("unknown command '{line}', try /help"));
    }

    ChatCommand::Ask(line.to_string())
}

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&config);

    println!();
    println!("  ╔══════════════════════════════════════════════════╗");
    println!("  ║   Simic Virtual Expert System: Interactive Mode   ║");
    println!("  ╚══════════════════════════════════════════════════╝");
    println!();
    println!("  Backend:   {}", describe(session.config()));
    print_status(&session).await;
    println!("  History:   last {} turns sent", session.max_history_turns());
    println!();
    println!("  Try:");
    for example in EXAMPLE_QUERIES {
        println!("    - {example}");
    }
    println!();
    println!("  Type /help for commands, 'exit' or Ctrl+D to quit.");
    println!();

    let mut rx = spawn_stdin_reader();
    prompt()?;

    while let Some(line) = rx.recv().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("  [Input Error] {e}");
                break;
            }
        };

        match parse_line(&line) {
            ChatCommand::Exit => break,
            ChatCommand::Help => print_help(),
            ChatCommand::Clear => {
                session.clear();
                println!("  Conversation cleared.");
            }
            ChatCommand::Status => print_status(&session).await,
            ChatCommand::Config(pairs) => reconfigure(&mut session, &pairs),
            ChatCommand::Use(kind) => {
                reconfigure(&mut session, &[("kind".to_string(), kind)]);
            }
            ChatCommand::Invalid(reason) => eprintln!("  [Error] {reason}"),
            ChatCommand::Ask(question) => {
                eprint!("  Analyzing with SVES...");
                let outcome = session.ask(&question).await;
                eprint!("\r                          \r");
                match outcome {
                    Ok(answer) => {
                        println!();
                        for line in answer.lines() {
                            println!("  SVES > {line}");
                        }
                    }
                    Err(e) => {
                        eprintln!("  [{}]", e.category());
                        for line in e.to_string().lines() {
                            eprintln!("  {line}");
                        }
                    }
                }
            }
        }

        println!();
        prompt()?;
    }

    println!();
    println!("  Goodbye.");
    println!();
    Ok(())
}

/// Apply `key=value` pairs to a copy of the active config and activate it.
/// Nothing changes unless every pair and the result are valid.
fn reconfigure(session: &mut Session, pairs: &[(String, String)]) {
    let mut candidate = session.config().clone();
    for (key, value) in pairs {
        if let Err(e) = candidate.set(key, value) {
            eprintln!("  [configuration error] {e}");
            return;
        }
    }
    match session.apply(candidate) {
        Ok(()) => println!("  Now using {}", describe(session.config())),
        Err(e) => eprintln!("  [configuration error] {e}"),
    }
}

async fn print_status(session: &Session) {
    let status = session.status().await;
    let marker = match status {
        ConnectionStatus::Connected => "●",
        ConnectionStatus::Disconnected | ConnectionStatus::Unconfigured => "○",
    };
    println!("  Status:    {marker} {status}");
    if status == ConnectionStatus::Unconfigured {
        if let Err(e) = session.config().validate() {
            println!("             {e}");
        }
    }
}

fn print_help() {
    let kinds: Vec<_> = BackendKind::ALL.iter().map(|k| k.as_str()).collect();
    println!("  Commands:");
    println!("    /clear                 Forget the conversation");
    println!("    /status                Probe the active backend");
    println!("    /config key=value ...  Change url, model, api_key, max_tokens, temperature, timeout");
    println!("    /use <kind>            Switch backend ({})", kinds.join(", "));
    println!("    /help                  Show this help");
    println!("    exit | quit            Leave");
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

/// Read stdin on a background task, one trimmed non-empty line per message.
fn spawn_stdin_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if tx.send(Ok(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break, // EOF (Ctrl+D)
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    break;
                }
            }
        }
    });
    rx
}
