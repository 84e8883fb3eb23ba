use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub recognizer: RecognizerConfig,

    #[serde(default)]
    pub actions: ActionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            greeting: default_greeting(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecognizerConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default)]
    pub vosk: Option<VoskConfig>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            sample_rate: default_sample_rate(),
            vosk: None,
        }
    }
}

impl RecognizerConfig {
    /// Flatten into the `toml::Value` handed to `SpeechEngine::initialize`.
    pub fn engine_config(&self) -> toml::Value {
        let mut table = toml::map::Map::new();
        table.insert(
            "sample_rate".to_string(),
            toml::Value::Integer(i64::from(self.sample_rate)),
        );
        if let Some(ref vosk) = self.vosk {
            table.insert(
                "model_path".to_string(),
                toml::Value::String(vosk.model_path.clone()),
            );
        }
        toml::Value::Table(table)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VoskConfig {
    pub model_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ActionsConfig {
    #[serde(default = "default_joke_url")]
    pub joke_url: String,

    #[serde(default = "default_speed_test_url")]
    pub speed_test_url: String,

    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,

    /// Optional bound on a single provider call. Absent means providers may
    /// block the session indefinitely, which is the original contract.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            joke_url: default_joke_url(),
            speed_test_url: default_speed_test_url(),
            screenshot_dir: default_screenshot_dir(),
            timeout_secs: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_greeting() -> String {
    "Voice assistant connected. Speak or type a command.".to_string()
}

fn default_engine() -> String {
    "null".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_joke_url() -> String {
    "https://icanhazdadjoke.com/".to_string()
}

fn default_speed_test_url() -> String {
    "https://speed.cloudflare.com/__down?bytes=10000000".to_string()
}

fn default_screenshot_dir() -> String {
    ".".to_string()
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        tracing::debug!(path = ?path, "configuration loaded");
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            recognizer: RecognizerConfig::default(),
            actions: ActionsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_valid_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9100
greeting = "hello there"

[recognizer]
engine = "vosk"
sample_rate = 8000

[recognizer.vosk]
model_path = "./models/vosk-model-small"

[actions]
joke_url = "https://example.com/joke"
timeout_secs = 30
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.greeting, "hello there");
        assert_eq!(config.recognizer.engine, "vosk");
        assert_eq!(config.recognizer.sample_rate, 8000);
        assert_eq!(
            config.recognizer.vosk.unwrap().model_path,
            "./models/vosk-model-small"
        );
        assert_eq!(config.actions.joke_url, "https://example.com/joke");
        assert_eq!(config.actions.timeout_secs, Some(30));
    }

    #[test]
    fn test_config_default_values() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(!config.server.greeting.is_empty());
        assert_eq!(config.recognizer.engine, "null");
        assert_eq!(config.recognizer.sample_rate, 16000);
        assert!(config.recognizer.vosk.is_none());
        assert_eq!(config.actions.screenshot_dir, ".");
        assert!(config.actions.timeout_secs.is_none());
    }

    #[test]
    fn test_config_env_var_interpolation() {
        std::env::set_var("VOXDESK_TEST_GREETING", "hi from env");
        let toml_str = r#"
[server]
greeting = "${VOXDESK_TEST_GREETING}"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.server.greeting, "hi from env");
        std::env::remove_var("VOXDESK_TEST_GREETING");
    }

    #[test]
    fn test_config_missing_env_var_error() {
        let toml_str = r#"
[server]
greeting = "${DEFINITELY_DOES_NOT_EXIST_12345}"
"#;
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("DEFINITELY_DOES_NOT_EXIST_12345"),
        );
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let toml_str = "this is not valid toml [[[";
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = std::env::temp_dir().join("voxdesk_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[general]
log_level = "warn"

[server]
port = 9000
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.server.port, 9000);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_load_from_file_not_found() {
        let result = AppConfig::load_from_file(std::path::Path::new("/nonexistent/path.toml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to read config file"),
        );
    }

    #[test]
    fn test_engine_config_includes_sample_rate_and_model() {
        let config = AppConfig::from_toml_str(
            r#"
[recognizer]
engine = "vosk"
sample_rate = 16000

[recognizer.vosk]
model_path = "/models/en"
"#,
        )
        .unwrap();
        let value = config.recognizer.engine_config();
        assert_eq!(value.get("sample_rate").unwrap().as_integer(), Some(16000));
        assert_eq!(
            value.get("model_path").unwrap().as_str(),
            Some("/models/en")
        );
    }

    #[test]
    fn test_engine_config_without_vosk_section() {
        let config = AppConfig::from_toml_str("").unwrap();
        let value = config.recognizer.engine_config();
        assert_eq!(value.get("sample_rate").unwrap().as_integer(), Some(16000));
        assert!(value.get("model_path").is_none());
    }
}
