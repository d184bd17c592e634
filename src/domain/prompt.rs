//! Prompt Context - Exchange 构造
//!
//! 每次请求构造一个两轮的 Exchange（系统指令 + 用户文本），用后即弃。
//! 系统指令 = 固定引导行 + 空行 + 场景描述块（固定定界符包裹），
//! 可选地在块后追加一条风格子句。
//!
//! 构造是纯函数: 相同输入必然产生相同的 Exchange。

use serde::Serialize;

use super::style::ResolvedStyle;

/// 固定的音频生成引导行
pub const DIRECTIVE: &str = "Generate audio following instruction.";

/// 场景描述块定界符
pub const SCENE_DESC_START: &str = "<|scene_desc_start|>";
pub const SCENE_DESC_END: &str = "<|scene_desc_end|>";

/// 缺省场景描述
pub const DEFAULT_SCENE_DESCRIPTION: &str = "Audio is recorded from a quiet room.";

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// 单轮消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// 两轮 Exchange
///
/// 不变量: messages 恒为 [system, user] 两条，顺序固定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub messages: Vec<Message>,
}

impl Exchange {
    /// 系统轮内容
    pub fn system_content(&self) -> &str {
        &self.messages[0].content
    }

    /// 用户轮内容
    pub fn user_content(&self) -> &str {
        &self.messages[1].content
    }
}

/// 构造 Exchange
///
/// - `scene_description` 缺失时使用 [`DEFAULT_SCENE_DESCRIPTION`]
/// - `style` 为 Some 时在场景块后追加风格子句
/// - 用户文本原样传递，不做长度或内容校验（空文本照常通过）
pub fn build_exchange(
    text: &str,
    scene_description: Option<&str>,
    style: Option<&ResolvedStyle>,
) -> Exchange {
    let scene = scene_description.unwrap_or(DEFAULT_SCENE_DESCRIPTION);

    let mut system = format!("{DIRECTIVE}\n\n{SCENE_DESC_START}\n{scene}\n{SCENE_DESC_END}");
    if let Some(style) = style {
        system.push('\n');
        system.push_str(style.clause);
    }

    Exchange {
        messages: vec![Message::system(system), Message::user(text)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::StyleTable;

    #[test]
    fn test_system_turn_contains_directive_and_scene_block() {
        let exchange = build_exchange("hello", Some("A windy beach."), None);
        let system = exchange.system_content();
        assert!(system.contains(DIRECTIVE));
        assert!(system.contains(SCENE_DESC_START));
        assert!(system.contains(SCENE_DESC_END));
        assert!(system.contains("A windy beach."));
        // 场景描述位于定界符之间
        let start = system.find(SCENE_DESC_START).unwrap();
        let scene = system.find("A windy beach.").unwrap();
        let end = system.find(SCENE_DESC_END).unwrap();
        assert!(start < scene && scene < end);
    }

    #[test]
    fn test_absent_scene_uses_default() {
        let exchange = build_exchange("hello", None, None);
        assert!(exchange.system_content().contains(DEFAULT_SCENE_DESCRIPTION));
    }

    #[test]
    fn test_user_turn_is_verbatim() {
        let exchange = build_exchange("  Hello,  world!  ", None, None);
        assert_eq!(exchange.user_content(), "  Hello,  world!  ");
    }

    #[test]
    fn test_empty_text_passes_through() {
        let exchange = build_exchange("", None, None);
        assert_eq!(exchange.user_content(), "");
        assert_eq!(exchange.messages.len(), 2);
    }

    #[test]
    fn test_style_clause_appended_after_scene_block() {
        let style = StyleTable::resolve(Some("활기차게"));
        let exchange = build_exchange("Hello world", None, Some(&style));
        let system = exchange.system_content();
        assert!(system.contains(style.clause));
        assert!(system.find(SCENE_DESC_END).unwrap() < system.find(style.clause).unwrap());
    }

    #[test]
    fn test_no_style_means_no_clause() {
        let exchange = build_exchange("hello", None, None);
        assert!(exchange.system_content().ends_with(SCENE_DESC_END));
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let style = StyleTable::resolve(Some("차분하게"));
        let a = build_exchange("text", Some("scene"), Some(&style));
        let b = build_exchange("text", Some("scene"), Some(&style));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_style_builds_same_prompt_as_default() {
        let unknown = StyleTable::resolve(Some("unknown_key"));
        let default = StyleTable::resolve(Some(crate::domain::style::DEFAULT_STYLE));
        let a = build_exchange("Hi", None, Some(&unknown));
        let b = build_exchange("Hi", None, Some(&default));
        assert_eq!(a, b);
    }

    #[test]
    fn test_exchange_serializes_as_chat_messages() {
        let exchange = build_exchange("hi", None, None);
        let json = serde_json::to_value(&exchange).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
