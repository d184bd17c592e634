//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// serve engine 配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 生成采样参数缺省值
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// serve engine 配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 引擎服务基础 URL
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// 生成模型标识
    #[serde(default = "default_model")]
    pub model: String,

    /// 音频 tokenizer 标识
    #[serde(default = "default_audio_tokenizer")]
    pub audio_tokenizer: String,

    /// 设备偏好: auto / cuda / cpu
    #[serde(default = "default_device")]
    pub device: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_model() -> String {
    "bosonai/higgs-audio-v2-generation-3B-base".to_string()
}

fn default_audio_tokenizer() -> String {
    "bosonai/higgs-audio-v2-tokenizer".to_string()
}

fn default_device() -> String {
    "auto".to_string()
}

fn default_engine_timeout() -> u64 {
    300
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            model: default_model(),
            audio_tokenizer: default_audio_tokenizer(),
            device: default_device(),
            timeout_secs: default_engine_timeout(),
        }
    }
}

/// 生成采样参数缺省值
///
/// temperature 可被单次请求覆盖，其余为固定旋钮。
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// 缺省 temperature（不做范围校验，推荐 0.1–1.0）
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_max_new_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.3
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    50
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

/// 输出模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// 写 WAV 文件，输出路径
    #[default]
    Wav,
    /// 输出结构化 JSON 记录
    Json,
}

/// 输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 二进制入口的输出模式
    #[serde(default)]
    pub mode: OutputMode,

    /// WAV 输出的固定路径
    #[serde(default = "default_wav_path")]
    pub wav_path: PathBuf,
}

fn default_wav_path() -> PathBuf {
    PathBuf::from("/tmp/output.wav")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            wav_path: default_wav_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.engine.url, "http://localhost:8000");
        assert_eq!(config.engine.model, "bosonai/higgs-audio-v2-generation-3B-base");
        assert_eq!(config.engine.audio_tokenizer, "bosonai/higgs-audio-v2-tokenizer");
        assert_eq!(config.engine.device, "auto");
        assert_eq!(config.generation.max_new_tokens, 1024);
        assert_eq!(config.generation.temperature, 0.3);
        assert_eq!(config.output.wav_path, PathBuf::from("/tmp/output.wav"));
    }
}
