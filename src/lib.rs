//! Higgs Guide - 托管 TTS 预测服务
//!
//! 把外部提供的多模态生成引擎（生成模型 + 音频 tokenizer，启动时加载一次）
//! 包装为一个简单的预测接口：输入文本 + 可选场景/风格描述 + temperature，
//! 输出一段波形。
//!
//! 领域层 (domain/):
//! - Style: 固定的风格名 → 语气子句映射，未知 key 回退默认
//! - Prompt: 系统指令 + 用户文本的两轮 Exchange 构造
//!
//! 应用层 (application/):
//! - Ports: ServeEngine 端口定义
//! - Predictor: 两个入口（WAV 文件路径 / 结构化记录）
//!
//! 基础设施层 (infrastructure/):
//! - Engine: HTTP serve engine 客户端、测试用固定引擎、设备探测
//! - Audio: 单声道 WAV 写出

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{PredictionFailure, PredictionOutcome, PredictionRecord, Predictor};
pub use config::{load_config, AppConfig};
