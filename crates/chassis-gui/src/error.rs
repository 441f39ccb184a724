//! GUI 层错误类型定义

use thiserror::Error;

/// GUI 层错误类型
#[derive(Error, Debug)]
pub enum GuiError {
    /// 循环切换按键不是布尔控件（构造期快速失败）
    #[error("A non-boolean input was supplied as the menu cycle control")]
    NotBooleanInput,

    /// 未注册的菜单名
    #[error("No menu registered under '{name}'")]
    UnknownMenu {
        /// 菜单名称
        name: String,
    },

    /// MenuHost 激活期间菜单集合为空
    ///
    /// 移除最后一个菜单属于调用方前置条件违反：MenuHost 激活期间
    /// 必须至少保留一个菜单。
    #[error("MenuHost has no menus registered")]
    NoMenusRegistered,
}
