//! `jotter init` — 写入配置骨架

use crate::storage::config::{config_path, load_config, save_config};

pub fn execute(url: Option<String>, key: Option<String>, table: String) {
    // 已有配置在此基础上更新，没给的字段保持原值
    let mut config = load_config();
    if let Some(url) = url {
        config.store.url = url.trim_end_matches('/').to_string();
    }
    if let Some(key) = key {
        config.store.api_key = key;
    }
    config.store.table = table;

    if let Err(e) = save_config(&config) {
        eprintln!("Failed to write config: {}", e);
        std::process::exit(1);
    }

    println!("✓ Wrote {}", config_path().display());

    if config.store.url.is_empty() || config.store.api_key.is_empty() {
        println!();
        println!("Store credentials are still missing. Edit the file, or run:");
        println!("  jotter init --url <url> --key <key>");
    } else {
        println!("  store url: {}", config.store.url);
        println!("  table:     {}", config.store.table);
        println!();
        println!("Run `jotter` to open your list.");
    }
}
