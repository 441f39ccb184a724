//! Orchestrator 层错误类型定义

use chassis_gui::GuiError;
use thiserror::Error;

/// Orchestrator 层错误类型
#[derive(Error, Debug)]
pub enum RobotError {
    /// GUI 层错误
    #[error("GUI error: {0}")]
    Gui(#[from] GuiError),

    /// 未注册的子系统名
    #[error("Unknown subsystem '{name}'")]
    UnknownSubsystem {
        /// 子系统注册名
        name: String,
    },

    /// 该子系统没有可用配置
    #[error("No configuration registered for subsystem '{name}'")]
    UnknownSubsystemConfig {
        /// 子系统注册名
        name: String,
    },

    /// 配置描述符中参数名重复
    #[error("Duplicate config param '{param}' in descriptor for '{subsystem}'")]
    DuplicateParam {
        /// 子系统注册名
        subsystem: String,
        /// 参数名
        param: String,
    },

    /// 选项型参数的候选列表为空
    #[error("Config param '{param}' declares no options")]
    EmptyOptions {
        /// 参数名
        param: String,
    },

    /// 选项型参数的默认值不在候选列表里
    #[error("Config param '{param}' default '{value}' is not one of its options")]
    InvalidDefault {
        /// 参数名
        param: String,
        /// 默认值
        value: String,
    },

    /// 配置存储 I/O 错误
    #[error("Config storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// 选项文件格式错误
    #[error("Malformed option file '{path}': {message}")]
    MalformedOptionFile {
        /// 文件路径
        path: String,
        /// 解析错误信息
        message: String,
    },

    /// 主 MenuHost 未启动
    ///
    /// 必须先调用 `start_gui` 再添加菜单（构造顺序前置条件）。
    #[error("Primary MenuHost not started; call start_gui before add_menu")]
    GuiNotStarted,
}
