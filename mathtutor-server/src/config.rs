//! Settings resolution: environment variable, then the optional local JSON
//! config file, then a hardcoded default. Empty or whitespace-only values
//! count as absent at every tier.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::prompt::DEFAULT_SYSTEM_PROMPT;

pub const DEFAULT_CONFIG_FILE: &str = "application.local.json";

const DEFAULT_MODEL: &str = "qwen-turbo";
const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com";
const DEFAULT_PORT: u16 = 5173;
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_STATIC_DIR: &str = ".";
const DEFAULT_CHAT_LOG: &str = "history.jsonl";
const DEFAULT_FEEDBACK_LOG: &str = "feedback.jsonl";

#[derive(Debug, Clone)]
pub struct Config {
    /// DashScope API key. May be empty; the upstream client rejects chat
    /// calls until one is configured.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub port: u16,
    pub temperature: f64,
    pub system_prompt: String,
    pub static_dir: PathBuf,
    pub chat_log: PathBuf,
    pub feedback_log: PathBuf,
}

impl Config {
    /// Resolve settings from the process environment and the config file
    /// named by `APPLICATION_CONFIG` (default `application.local.json`).
    pub fn load() -> Self {
        let file_path = env_value("APPLICATION_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        let file = load_config_file(Path::new(&file_path));
        Self::resolve(env_value, &file)
    }

    /// Core resolution, parameterized over the environment lookup so tests
    /// do not have to mutate process-wide env vars.
    fn resolve<E>(env: E, file: &Value) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, path: &[&str]| -> Option<String> {
            env(var).or_else(|| file_value(file, path))
        };

        let base_url = pick("DASHSCOPE_BASE_URL", &["dashscope", "base_url"])
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            api_key: pick("DASHSCOPE_API_KEY", &["dashscope", "api_key"]).unwrap_or_default(),
            model: pick("QWEN_MODEL", &["dashscope", "model"])
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            port: pick("PORT", &["server", "port"])
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            temperature: pick("CHAT_TEMPERATURE", &["chat", "temperature"])
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TEMPERATURE),
            system_prompt: pick("CHAT_SYSTEM_PROMPT", &["chat", "system_prompt"])
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            static_dir: pick("STATIC_DIR", &["server", "static_dir"])
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            chat_log: pick("CHAT_LOG_FILE", &["log", "chat_file"])
                .unwrap_or_else(|| DEFAULT_CHAT_LOG.to_string())
                .into(),
            feedback_log: pick("FEEDBACK_LOG_FILE", &["log", "feedback_file"])
                .unwrap_or_else(|| DEFAULT_FEEDBACK_LOG.to_string())
                .into(),
        }
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read the config file as a JSON object. Anything short of that (missing
/// file, unreadable, invalid JSON, non-object JSON) resolves to an empty
/// object; configuration problems never stop the server from starting.
fn load_config_file(path: &Path) -> Value {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                debug!("config file {} is not a JSON object, ignoring", path.display());
                Value::Object(Default::default())
            }
            Err(err) => {
                debug!("config file {} is not valid JSON, ignoring: {err}", path.display());
                Value::Object(Default::default())
            }
        },
        Err(_) => Value::Object(Default::default()),
    }
}

/// Walk a dotted path through nested objects, coercing the leaf to a string.
fn file_value(file: &Value, path: &[&str]) -> Option<String> {
    let mut current = file;
    for key in path {
        current = current.get(key)?;
    }
    let resolved = match current {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let resolved = resolved.trim().to_string();
    (!resolved.is_empty()).then_some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Write;

    fn fake_env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
    }

    #[test]
    fn defaults_apply_with_nothing_configured() {
        let config = Config::resolve(fake_env(&[]), &json!({}));
        assert_eq!(config.api_key, "");
        assert_eq!(config.model, "qwen-turbo");
        assert_eq!(config.base_url, "https://dashscope.aliyuncs.com");
        assert_eq!(config.port, 5173);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.chat_log, PathBuf::from("history.jsonl"));
        assert_eq!(config.feedback_log, PathBuf::from("feedback.jsonl"));
    }

    #[test]
    fn env_beats_file_beats_default() {
        let file = json!({
            "dashscope": {"api_key": "from-file", "model": "qwen-max"},
            "server": {"port": 8080},
        });
        let env = fake_env(&[("DASHSCOPE_API_KEY", "from-env")]);
        let config = Config::resolve(env, &file);
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.model, "qwen-max");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn empty_env_values_fall_through() {
        let file = json!({"dashscope": {"model": "qwen-plus"}});
        let env = fake_env(&[("QWEN_MODEL", "   ")]);
        let config = Config::resolve(env, &file);
        assert_eq!(config.model, "qwen-plus");
    }

    #[test]
    fn numeric_file_values_are_coerced() {
        let file = json!({"server": {"port": 9000}, "chat": {"temperature": 0.3}});
        let config = Config::resolve(fake_env(&[]), &file);
        assert_eq!(config.port, 9000);
        assert_eq!(config.temperature, 0.3);
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let env = fake_env(&[("PORT", "not-a-port")]);
        let config = Config::resolve(env, &json!({}));
        assert_eq!(config.port, 5173);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let env = fake_env(&[("DASHSCOPE_BASE_URL", "https://example.com/")]);
        let config = Config::resolve(env, &json!({}));
        assert_eq!(config.base_url, "https://example.com");
    }

    #[test]
    fn malformed_config_file_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert_eq!(load_config_file(file.path()), json!({}));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert_eq!(load_config_file(file.path()), json!({}));

        assert_eq!(load_config_file(Path::new("/no/such/file.json")), json!({}));
    }

    #[test]
    fn config_file_values_are_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dashscope": {{"api_key": "sk-test"}}}}"#).unwrap();
        let parsed = load_config_file(file.path());
        assert_eq!(
            file_value(&parsed, &["dashscope", "api_key"]),
            Some("sk-test".to_string())
        );
        assert_eq!(file_value(&parsed, &["dashscope", "missing"]), None);
    }
}
