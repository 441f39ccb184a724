//! 菜单文本行
//!
//! 每行分两段：*选择区*（光标可以停留、闪烁覆盖生效的区域）和其后的
//! 普通文本。纯显示行选择区为空。

/// 一行菜单文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiLine {
    /// 选择区文本
    pub selection: String,
    /// 选择区之后的普通文本
    pub rest: String,
}

impl GuiLine {
    /// 带选择区的行
    pub fn new(selection: impl Into<String>, rest: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
            rest: rest.into(),
        }
    }

    /// 纯显示行（无选择区）
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            selection: String::new(),
            rest: text.into(),
        }
    }

    /// 整行文本
    pub fn text(&self) -> String {
        format!("{}{}", self.selection, self.rest)
    }

    /// 用替换后的选择区文本拼整行
    pub fn text_with_selection(&self, selection: &str) -> String {
        format!("{}{}", selection, self.rest)
    }
}
