//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::{load_config, open_db};

pub async fn cmd_serve(
    db_path: &Path,
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    no_auth: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting triplog web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let api_keys = triplog_server::api_keys_from_env();

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!("   🔒 Authentication: access proxy header");
        if !api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured ({})",
                api_keys.len(),
                triplog_server::API_KEYS_ENV
            );
        }
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let logbook_config = load_config(config_path)?;
    let db = open_db(db_path)?;

    let config = triplog_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    triplog_server::serve_with_config(db, logbook_config, host, port, static_dir_str, config)
        .await?;

    Ok(())
}
