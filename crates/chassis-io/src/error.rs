//! IO 层错误类型定义

use thiserror::Error;

/// IO 层错误类型
#[derive(Error, Debug)]
pub enum IoError {
    /// 布尔槽位绑定了非布尔控件
    #[error("Binding '{name}' is not a boolean input")]
    NotBooleanInput {
        /// 绑定名称
        name: String,
    },

    /// 模拟槽位绑定了非模拟控件
    #[error("Binding '{name}' is not an analog input")]
    NotAnalogInput {
        /// 绑定名称
        name: String,
    },

    /// 未注册的绑定名称
    #[error("No binding registered under '{name}'")]
    UnknownBinding {
        /// 绑定名称
        name: String,
    },
}
