//! HTTP Serve Engine - 调用外部生成引擎服务
//!
//! 实现 ServeEnginePort trait，通过 HTTP 调用外部 serve engine。
//!
//! 外部引擎 API:
//! POST {base_url}/v1/load      Request: {"model": "...", "audio_tokenizer": "...", "device": "cuda|cpu"}
//! POST {base_url}/v1/generate  Request: {"messages": [...], "max_new_tokens": ..., ...}
//!                              Response: {"audio": [f32...], "sampling_rate": u32}
//!
//! 引擎句柄每进程只构造一次；构造时同步加载模型，失败即致命，
//! 没有重试也没有降级模式。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{EngineError, GenerationOutput, GenerationParams, ServeEnginePort};
use crate::domain::prompt::{Exchange, Message};
use crate::infrastructure::engine::device::Device;

/// 模型加载请求体 (JSON)
#[derive(Debug, Serialize)]
struct LoadHttpRequest<'a> {
    /// 生成模型标识
    model: &'a str,
    /// 音频 tokenizer 标识
    audio_tokenizer: &'a str,
    /// 启动时探测得到的计算设备
    device: &'a str,
}

/// 生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerateHttpRequest<'a> {
    messages: &'a [Message],
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    stop_strings: &'a [String],
}

/// 生成响应体 (JSON)
#[derive(Debug, Deserialize)]
struct GenerateHttpResponse {
    audio: Vec<f32>,
    sampling_rate: u32,
}

/// HTTP 引擎客户端配置
#[derive(Debug, Clone)]
pub struct HttpServeEngineConfig {
    /// 引擎服务基础 URL
    pub base_url: String,
    /// 生成模型标识
    pub model: String,
    /// 音频 tokenizer 标识
    pub audio_tokenizer: String,
    /// 计算设备
    pub device: Device,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpServeEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: "bosonai/higgs-audio-v2-generation-3B-base".to_string(),
            audio_tokenizer: "bosonai/higgs-audio-v2-tokenizer".to_string(),
            device: Device::Cpu,
            timeout_secs: 300,
        }
    }
}

/// HTTP Serve Engine 客户端
pub struct HttpServeEngine {
    client: Client,
    config: HttpServeEngineConfig,
}

impl HttpServeEngine {
    /// 构造客户端并加载模型
    ///
    /// 加载失败被记录后原样返回，调用方应中止启动。
    pub async fn connect(config: HttpServeEngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        let engine = Self { client, config };
        if let Err(e) = engine.load_model().await {
            tracing::error!(error = %e, "Serve engine load failed, aborting");
            return Err(e);
        }

        tracing::info!(
            model = %engine.config.model,
            audio_tokenizer = %engine.config.audio_tokenizer,
            device = %engine.config.device,
            "Serve engine loaded"
        );
        Ok(engine)
    }

    async fn load_model(&self) -> Result<(), EngineError> {
        let request = LoadHttpRequest {
            model: &self.config.model,
            audio_tokenizer: &self.config.audio_tokenizer,
            device: self.config.device.as_str(),
        };

        let response = self
            .client
            .post(self.load_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::LoadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::LoadFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }

    fn load_url(&self) -> String {
        format!("{}/v1/load", self.config.base_url)
    }

    fn generate_url(&self) -> String {
        format!("{}/v1/generate", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }
}

#[async_trait]
impl ServeEnginePort for HttpServeEngine {
    async fn generate(
        &self,
        exchange: &Exchange,
        params: &GenerationParams,
    ) -> Result<GenerationOutput, EngineError> {
        let request = GenerateHttpRequest {
            messages: &exchange.messages,
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            stop_strings: &params.stop_strings,
        };

        tracing::debug!(
            url = %self.generate_url(),
            text_len = exchange.user_content().len(),
            temperature = params.temperature,
            "Sending generate request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else if e.is_connect() {
                    EngineError::NetworkError(format!("Cannot connect to serve engine: {}", e))
                } else {
                    EngineError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GenerateHttpResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(format!("Failed to parse audio: {}", e)))?;

        tracing::info!(
            samples = body.audio.len(),
            sampling_rate = body.sampling_rate,
            "Generation completed"
        );

        Ok(GenerationOutput {
            audio: body.audio,
            sampling_rate: body.sampling_rate,
        })
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpServeEngineConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.model, "bosonai/higgs-audio-v2-generation-3B-base");
        assert_eq!(config.audio_tokenizer, "bosonai/higgs-audio-v2-tokenizer");
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn test_urls() {
        let config = HttpServeEngineConfig {
            base_url: "http://engine:9000".to_string(),
            ..Default::default()
        };
        let engine = HttpServeEngine {
            client: Client::new(),
            config,
        };
        assert_eq!(engine.load_url(), "http://engine:9000/v1/load");
        assert_eq!(engine.generate_url(), "http://engine:9000/v1/generate");
        assert_eq!(engine.health_url(), "http://engine:9000/health");
    }
}
