//! Application Layer - 应用层
//!
//! - Ports: 端口定义（ServeEngine）
//! - Predictor: 预测服务（两个入口）

mod error;
pub mod ports;
mod predictor;

pub use error::PredictError;
pub use predictor::{PredictionFailure, PredictionOutcome, PredictionRecord, Predictor};
