//! 应用层错误定义
//!
//! 文件输出模式下的错误直接向调用方传播；结构化输出模式下
//! 错误在 predictor 内被捕获并转换为 Failure 记录，不会抛出。

use thiserror::Error;

use crate::application::ports::EngineError;

/// 预测错误（文件输出模式）
#[derive(Debug, Error)]
pub enum PredictError {
    /// 生成失败
    #[error("Generation failed: {0}")]
    Generation(#[from] EngineError),

    /// 波形写出失败
    #[error("Failed to write waveform: {0}")]
    AudioWrite(String),
}
