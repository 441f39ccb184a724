//! 纯遥测显示菜单
//!
//! 按插入顺序显示 "标题: 值" 行，不响应输入，光标不参与。子系统在
//! 每个周期写入最新数值。

use std::fmt::Display;

use chassis_io::InputFrame;

use crate::cursor::Cursor;
use crate::line::GuiLine;
use crate::menu::Menu;

/// 遥测显示屏幕
///
/// # 示例
///
/// ```rust
/// use chassis_gui::DisplayMenu;
///
/// let mut menu = DisplayMenu::new();
/// menu.add_data("Heading", 87.5);
/// menu.add_data("Lift", "raised");
/// ```
#[derive(Debug, Default)]
pub struct DisplayMenu {
    entries: Vec<(String, String)>,
}

impl DisplayMenu {
    /// 创建空显示菜单
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新（或追加）一条数据行
    pub fn add_data(&mut self, caption: &str, value: impl Display) {
        let rendered = value.to_string();
        match self.entries.iter_mut().find(|(c, _)| c == caption) {
            Some((_, v)) => *v = rendered,
            None => self.entries.push((caption.to_string(), rendered)),
        }
    }

    /// 清空所有数据行
    pub fn clear_data(&mut self) {
        self.entries.clear();
    }

    /// 数据行数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有数据行
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Menu for DisplayMenu {
    fn handle_input(&mut self, _frame: &InputFrame, _cursor: &Cursor) {}

    fn render(&self, _cursor: &Cursor) -> Vec<GuiLine> {
        self.entries
            .iter()
            .map(|(caption, value)| GuiLine::plain(format!("{caption}: {value}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_in_insertion_order() {
        let mut menu = DisplayMenu::new();
        menu.add_data("Heading", 90);
        menu.add_data("Lift", "up");

        let cursor = Cursor::new(Duration::from_millis(500));
        let lines = menu.render(&cursor);
        assert_eq!(lines[0].text(), "Heading: 90");
        assert_eq!(lines[1].text(), "Lift: up");
    }

    #[test]
    fn test_add_data_updates_existing_caption() {
        let mut menu = DisplayMenu::new();
        menu.add_data("Heading", 90);
        menu.add_data("Heading", 91);

        assert_eq!(menu.len(), 1);
        let cursor = Cursor::new(Duration::from_millis(500));
        assert_eq!(menu.render(&cursor)[0].text(), "Heading: 91");
    }

    #[test]
    fn test_no_selectable_rows() {
        let menu = DisplayMenu::new();
        assert_eq!(menu.selectable_rows(), 0);
        assert!(!menu.is_done());
    }
}
