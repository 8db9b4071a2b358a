//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{jotter_dir, load_toml, save_toml};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// 远端 record store 连接配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// 服务地址（如 https://abc.supabase.co）
    #[serde(default)]
    pub url: String,
    /// API key（同时作为 apikey header 和 Bearer token）
    #[serde(default)]
    pub api_key: String,
    /// 表名
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "todos".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
        }
    }
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    jotter_dir().join("config.toml")
}

/// 加载配置（不存在或损坏则返回默认值）
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

pub(crate) fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    load_toml(path).unwrap_or_default()
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&config_path(), config)
}

pub(crate) fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    save_toml(path, config)
}
