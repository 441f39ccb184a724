//! # Chassis GUI - 菜单与光标呈现层
//!
//! 在共享文本输出表面上复用多个屏幕（Menu），同一时刻只有一个激活：
//!
//! - [`MenuHost`] 持有命名菜单集合、一个循环切换按键和一个 [`Cursor`]，
//!   每个控制周期重绘一次激活菜单
//! - [`Menu`] 是可渲染、可响应输入的屏幕抽象；[`DisplayMenu`] 是
//!   最常用的纯遥测变体
//! - [`Cursor`] 跟踪二维位置和闪烁相位，供激活菜单做高亮反馈
//!
//! # 边沿触发
//!
//! 菜单循环按键是边沿触发的：一次按下只切换一个菜单，按住不放不会
//! 连续切换，松开后才重新武装。

mod cursor;
mod error;
mod host;
mod line;
mod menu;
pub mod menus;

pub use cursor::Cursor;
pub use error::GuiError;
pub use host::MenuHost;
pub use line::GuiLine;
pub use menu::Menu;
pub use menus::DisplayMenu;
