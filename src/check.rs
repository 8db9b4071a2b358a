//! 启动前配置检查

use crate::storage::config::Config;

pub struct CheckResult {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// 启动 TUI 前确认 record store 连接配置齐全
///
/// 只做静态检查，不发请求：网络问题留给运行期的静默失败语义。
pub fn check_config(config: &Config) -> CheckResult {
    let mut errors = Vec::new();

    let url = config.store.url.trim();
    if url.is_empty() {
        errors.push("store url is not set".to_string());
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(format!(
            "store url must start with http:// or https:// (got \"{}\")",
            url
        ));
    }

    if config.store.api_key.trim().is_empty() {
        errors.push("store api key is not set".to_string());
    }

    if config.store.table.trim().is_empty() {
        errors.push("store table name is empty".to_string());
    }

    CheckResult {
        ok: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        let mut config = Config::default();
        config.store.url = "https://abc.supabase.co".to_string();
        config.store.api_key = "secret".to_string();
        config
    }

    #[test]
    fn test_complete_config_passes() {
        let result = check_config(&configured());
        assert!(result.ok);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_default_config_fails() {
        let result = check_config(&Config::default());
        assert!(!result.ok);
        assert_eq!(result.errors.len(), 2); // url + api key
    }

    #[test]
    fn test_bad_scheme_is_rejected() {
        let mut config = configured();
        config.store.url = "abc.supabase.co".to_string();
        let result = check_config(&config);
        assert!(!result.ok);
        assert!(result.errors[0].contains("http"));
    }

    #[test]
    fn test_blank_table_is_rejected() {
        let mut config = configured();
        config.store.table = "  ".to_string();
        let result = check_config(&config);
        assert!(!result.ok);
    }
}
