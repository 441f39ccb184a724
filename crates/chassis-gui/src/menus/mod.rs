//! 内置菜单变体

mod display;

pub use display::DisplayMenu;
