//! Predictor - 预测服务
//!
//! 每次请求走一遍 Formatter → Invoker → Packager 的直线流水:
//! 构造 Exchange，转发给引擎，把返回的样本数组包装为产物。
//!
//! 两个入口共享同一个长生命周期的引擎句柄:
//! - `predict_to_file`: 写单声道 WAV 到固定路径，失败原样传播
//! - `predict`: 返回结构化记录，失败被捕获并转换为 Failure 记录

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::application::error::PredictError;
use crate::application::ports::{GenerationParams, ServeEnginePort};
use crate::config::{GenerationConfig, OutputConfig};
use crate::domain::prompt::build_exchange;
use crate::domain::style::{ResolvedStyle, StyleTable, DEFAULT_STYLE};
use crate::infrastructure::audio::write_mono_wav;

/// 结构化输出记录
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    /// 原始样本序列
    pub audio: Vec<f32>,
    /// 采样率
    pub sampling_rate: u32,
    /// 时长（秒）= 样本数 / 采样率
    pub duration: f64,
    /// 原始输入文本
    pub text: String,
    /// 实际生效的风格名（未知 key 回退后为默认风格名）
    pub voice_style: String,
    /// 生成模型标识
    pub model: String,
}

/// 失败记录
///
/// 回显原始请求字段，调用方通过 error 字段判断失败。
#[derive(Debug, Clone, Serialize)]
pub struct PredictionFailure {
    pub error: String,
    pub text: String,
    pub voice_style: String,
}

/// 预测结果: 成功记录或失败记录
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Success(PredictionRecord),
    Failure(PredictionFailure),
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn as_record(&self) -> Option<&PredictionRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&PredictionFailure> {
        match self {
            Self::Failure(failure) => Some(failure),
            Self::Success(_) => None,
        }
    }
}

/// 预测服务
///
/// 引擎句柄构造一次后只读共享；服务本身不持有任何每请求状态。
pub struct Predictor {
    engine: Arc<dyn ServeEnginePort>,
    generation: GenerationConfig,
    output: OutputConfig,
}

impl Predictor {
    pub fn new(
        engine: Arc<dyn ServeEnginePort>,
        generation: GenerationConfig,
        output: OutputConfig,
    ) -> Self {
        Self {
            engine,
            generation,
            output,
        }
    }

    /// 路径产出接口
    ///
    /// 生成波形并写为单声道 WAV，返回固定输出路径。
    /// 无风格子句；任何失败直接向调用方传播。
    pub async fn predict_to_file(
        &self,
        text: &str,
        scene_description: Option<&str>,
    ) -> Result<PathBuf, PredictError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            text_len = text.len(),
            scene = scene_description.is_some(),
            "Starting file prediction"
        );

        let exchange = build_exchange(text, scene_description, None);
        let params = self.params(self.generation.temperature);

        let output = self.engine.generate(&exchange, &params).await?;

        write_mono_wav(&self.output.wav_path, &output.audio, output.sampling_rate)
            .map_err(|e| PredictError::AudioWrite(e.to_string()))?;

        tracing::info!(
            %request_id,
            path = %self.output.wav_path.display(),
            samples = output.audio.len(),
            sampling_rate = output.sampling_rate,
            "Waveform saved"
        );

        Ok(self.output.wav_path.clone())
    }

    /// 结构化产出接口
    ///
    /// 未知或缺失的 voice_style 静默回退到默认风格；
    /// 生成或打包中的任何失败被捕获、记录日志并转换为 Failure 记录，
    /// 绝不向调用方抛出。
    pub async fn predict(
        &self,
        text: &str,
        voice_style: Option<&str>,
        temperature: Option<f32>,
    ) -> PredictionOutcome {
        let requested = voice_style.unwrap_or(DEFAULT_STYLE);
        let style = StyleTable::resolve(voice_style);
        let temperature = temperature.unwrap_or(self.generation.temperature);
        let request_id = Uuid::new_v4();

        match self.generate_record(text, &style, temperature).await {
            Ok(record) => {
                tracing::info!(
                    %request_id,
                    text_len = text.len(),
                    voice_style = %record.voice_style,
                    duration = record.duration,
                    sampling_rate = record.sampling_rate,
                    "Prediction completed"
                );
                PredictionOutcome::Success(record)
            }
            Err(e) => {
                tracing::error!(%request_id, error = %e, "Prediction failed");
                PredictionOutcome::Failure(PredictionFailure {
                    error: e.to_string(),
                    text: text.to_string(),
                    voice_style: requested.to_string(),
                })
            }
        }
    }

    async fn generate_record(
        &self,
        text: &str,
        style: &ResolvedStyle,
        temperature: f32,
    ) -> Result<PredictionRecord, PredictError> {
        let exchange = build_exchange(text, None, Some(style));
        let params = self.params(temperature);

        let output = self.engine.generate(&exchange, &params).await?;
        let duration = output.audio.len() as f64 / output.sampling_rate as f64;

        Ok(PredictionRecord {
            audio: output.audio,
            sampling_rate: output.sampling_rate,
            duration,
            text: text.to_string(),
            voice_style: style.name.to_string(),
            model: self.engine.model_id().to_string(),
        })
    }

    fn params(&self, temperature: f32) -> GenerationParams {
        GenerationParams {
            max_new_tokens: self.generation.max_new_tokens,
            temperature,
            top_p: self.generation.top_p,
            top_k: self.generation.top_k,
            ..Default::default()
        }
    }
}
