//! 菜单能力抽象
//!
//! 一个 Menu 是一屏可渲染、可响应输入的内容。具体变体（纯遥测显示、
//! 配置编辑器）实现本 trait，由 [`MenuHost`](crate::MenuHost) 驱动，
//! 单层实现即可，不需要继承层次。

use chassis_io::InputFrame;

use crate::cursor::Cursor;
use crate::line::GuiLine;

/// 可渲染、可响应输入的屏幕
pub trait Menu: Send {
    /// MenuHost 启动时调用一次
    fn init(&mut self, cursor: &mut Cursor) {
        let _ = cursor;
    }

    /// 菜单成为激活菜单时调用（每次切换都触发）
    fn open(&mut self) {}

    /// MenuHost 停止时调用
    fn stop(&mut self) {}

    /// 每个重绘周期处理一次输入（仅激活菜单收到）
    fn handle_input(&mut self, frame: &InputFrame, cursor: &Cursor) {
        let _ = (frame, cursor);
    }

    /// 产出本周期要显示的 0..N 行
    fn render(&self, cursor: &Cursor) -> Vec<GuiLine>;

    /// 光标可停留的行数（0 表示光标不参与本菜单）
    fn selectable_rows(&self) -> usize {
        0
    }

    /// 菜单是否已完成其工作
    ///
    /// 配置流程用它判断编辑何时结束；普通菜单永远返回 `false`。
    fn is_done(&self) -> bool {
        false
    }
}
