//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `HIGGS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `HIGGS_ENGINE__URL=http://engine-server:8000`
/// - `HIGGS_ENGINE__DEVICE=cpu`
/// - `HIGGS_GENERATION__TEMPERATURE=0.5`
/// - `HIGGS_OUTPUT__WAV_PATH=/tmp/guide.wav`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("engine.url", "http://localhost:8000")?
        .set_default("engine.model", "bosonai/higgs-audio-v2-generation-3B-base")?
        .set_default("engine.audio_tokenizer", "bosonai/higgs-audio-v2-tokenizer")?
        .set_default("engine.device", "auto")?
        .set_default("engine.timeout_secs", 300)?
        .set_default("generation.max_new_tokens", 1024)?
        .set_default("generation.temperature", 0.3)?
        .set_default("generation.top_p", 0.95)?
        .set_default("generation.top_k", 50)?
        .set_default("output.mode", "wav")?
        .set_default("output.wav_path", "/tmp/output.wav")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: HIGGS_
    // 层级分隔符: __ (双下划线)
    // 例如: HIGGS_ENGINE__URL=http://engine-server:8000
    builder = builder.add_source(
        Environment::with_prefix("HIGGS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.engine.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine URL cannot be empty".to_string(),
        ));
    }

    if config.engine.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "Model identifier cannot be empty".to_string(),
        ));
    }

    if config.engine.audio_tokenizer.is_empty() {
        return Err(ConfigError::ValidationError(
            "Audio tokenizer identifier cannot be empty".to_string(),
        ));
    }

    if config.engine.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Engine timeout cannot be 0".to_string(),
        ));
    }

    if config.generation.max_new_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "max_new_tokens cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Engine URL: {}", config.engine.url);
    tracing::info!("Model: {}", config.engine.model);
    tracing::info!("Audio Tokenizer: {}", config.engine.audio_tokenizer);
    tracing::info!("Device Preference: {}", config.engine.device);
    tracing::info!("Engine Timeout: {}s", config.engine.timeout_secs);
    tracing::info!("Max New Tokens: {}", config.generation.max_new_tokens);
    tracing::info!("Temperature: {}", config.generation.temperature);
    tracing::info!("Output Mode: {:?}", config.output.mode);
    tracing::info!("WAV Path: {:?}", config.output.wav_path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_engine_url() {
        let mut config = AppConfig::default();
        config.engine.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.engine.model = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.engine.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_max_new_tokens() {
        let mut config = AppConfig::default();
        config.generation.max_new_tokens = 0;
        assert!(validate_config(&config).is_err());
    }
}
