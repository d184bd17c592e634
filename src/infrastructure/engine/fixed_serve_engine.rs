//! Fixed Serve Engine - 用于测试的引擎实现
//!
//! 始终返回固定的样本数组（或固定的失败），不实际调用引擎服务。

use async_trait::async_trait;

use crate::application::ports::{EngineError, GenerationOutput, GenerationParams, ServeEnginePort};
use crate::domain::prompt::Exchange;

/// 固定引擎
pub struct FixedServeEngine {
    audio: Vec<f32>,
    sampling_rate: u32,
    model: String,
    fail_with: Option<String>,
}

impl FixedServeEngine {
    /// 始终返回给定样本数组与采样率
    pub fn returning(audio: Vec<f32>, sampling_rate: u32) -> Self {
        Self {
            audio,
            sampling_rate,
            model: "fixed-engine".to_string(),
            fail_with: None,
        }
    }

    /// 始终以给定消息失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            audio: Vec::new(),
            sampling_rate: 0,
            model: "fixed-engine".to_string(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl ServeEnginePort for FixedServeEngine {
    async fn generate(
        &self,
        exchange: &Exchange,
        _params: &GenerationParams,
    ) -> Result<GenerationOutput, EngineError> {
        tracing::debug!(
            text_len = exchange.user_content().len(),
            "FixedServeEngine: returning fixed audio"
        );

        if let Some(message) = &self.fail_with {
            return Err(EngineError::ServiceError(message.clone()));
        }

        Ok(GenerationOutput {
            audio: self.audio.clone(),
            sampling_rate: self.sampling_rate,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
