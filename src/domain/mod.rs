//! Domain Layer - 领域层
//!
//! - Style Context: 语音风格表与回退规则
//! - Prompt Context: 系统指令 + 用户文本的两轮 Exchange 构造

pub mod prompt;
pub mod style;

pub use prompt::{build_exchange, Exchange, Message, Role, DEFAULT_SCENE_DESCRIPTION};
pub use style::{ResolvedStyle, StyleTable, DEFAULT_STYLE};
