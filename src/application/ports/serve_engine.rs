//! Serve Engine Port - 外部生成引擎抽象
//!
//! 定义对外部多模态生成引擎的抽象接口，具体实现在 infrastructure/engine 层。
//! 引擎本身（模型、音频 tokenizer、解码）是不透明依赖，这里只约定
//! generate(Exchange, 采样参数) → (样本数组, 采样率) 一个操作。

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::prompt::Exchange;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// 引擎/模型加载失败（致命，启动即中止）
    #[error("Engine load failed: {0}")]
    LoadFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 生成采样参数
///
/// 除 temperature 由调用方传入外，其余均为固定缺省值。
/// temperature 不做范围校验（推荐 0.1–1.0）。
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    /// 固定的序列终止标记对
    pub stop_strings: Vec<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 1024,
            temperature: 0.3,
            top_p: 0.95,
            top_k: 50,
            stop_strings: vec!["<|end_of_text|>".to_string(), "<|eot_id|>".to_string()],
        }
    }
}

impl GenerationParams {
    /// 以指定 temperature 构造，其余取固定缺省值
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            ..Default::default()
        }
    }
}

/// 生成结果
///
/// 引擎返回的原始样本数组与采样率，本仓库从不解读其内容。
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub audio: Vec<f32>,
    pub sampling_rate: u32,
}

/// Serve Engine Port
///
/// 每次 generate 调用相互独立且无状态，端口实现不得缓存结果或合并并发请求。
#[async_trait]
pub trait ServeEnginePort: Send + Sync {
    /// 执行一次生成
    async fn generate(
        &self,
        exchange: &Exchange,
        params: &GenerationParams,
    ) -> Result<GenerationOutput, EngineError>;

    /// 生成模型标识（回显到输出记录）
    fn model_id(&self) -> &str;

    /// 检查引擎是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GenerationParams::default();
        assert_eq!(params.max_new_tokens, 1024);
        assert_eq!(params.temperature, 0.3);
        assert_eq!(params.top_p, 0.95);
        assert_eq!(params.top_k, 50);
        assert_eq!(params.stop_strings, vec!["<|end_of_text|>", "<|eot_id|>"]);
    }

    #[test]
    fn test_with_temperature_keeps_other_defaults() {
        let params = GenerationParams::with_temperature(0.7);
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.max_new_tokens, 1024);
        assert_eq!(params.stop_strings.len(), 2);
    }
}
