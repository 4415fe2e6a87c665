//! `sves init`: write the default config file.

use std::path::Path;

use sves_config::AppConfig;

/// Write the default config to `path` unless something is already there.
/// Returns whether a file was written.
pub fn write_default(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(true)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_path();

    println!("SVES Setup");
    println!("==========\n");

    if write_default(&config_path)? {
        println!("  Created {}", config_path.display());
        println!("\n  Next steps:");
        println!("    1. Start a backend, e.g. `ollama serve` and `ollama pull llama3.1:70b`");
        println!("    2. Edit [backend] in the config file if it runs elsewhere");
        println!("    3. Run `sves status`, then `sves chat`");
    } else {
        println!("  Config already exists at: {}", config_path.display());
        println!("  Edit it manually or delete it and re-run init.");
    }

    Ok(())
}
