//! 命名控件绑定
//!
//! `ControlBindings` 把配置声明中的控件名映射到具体按键，子系统用名字
//! 读取输入，不关心实际绑定到哪个按键。

use std::collections::HashMap;

use crate::button::Button;
use crate::error::IoError;
use crate::hub::InputFrame;

/// 名字 → 按键的绑定表
///
/// # 示例
///
/// ```rust
/// use chassis_io::{BooleanInput, Button, ControlBindings, GamepadId, InputHub};
///
/// let mut bindings = ControlBindings::new();
/// bindings.add_button("Intake", Button::boolean(GamepadId::Primary, BooleanInput::A));
///
/// let hub = InputHub::new();
/// let frame = hub.frame();
/// assert_eq!(bindings.read_bool("Intake", &frame).unwrap(), false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlBindings {
    buttons: HashMap<String, Button>,
}

impl ControlBindings {
    /// 创建空绑定表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个命名绑定（同名覆盖）
    pub fn add_button(&mut self, name: impl Into<String>, button: Button) {
        self.buttons.insert(name.into(), button);
    }

    /// 查询绑定
    pub fn button(&self, name: &str) -> Option<&Button> {
        self.buttons.get(name)
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// 读取布尔绑定的当前值
    ///
    /// # 错误
    ///
    /// - [`IoError::UnknownBinding`]：名字未注册
    /// - [`IoError::NotBooleanInput`]：绑定的是模拟控件
    pub fn read_bool(&self, name: &str, frame: &InputFrame) -> Result<bool, IoError> {
        let button = self.buttons.get(name).ok_or_else(|| IoError::UnknownBinding {
            name: name.to_string(),
        })?;
        frame.bool_value(button).ok_or_else(|| IoError::NotBooleanInput {
            name: name.to_string(),
        })
    }

    /// 读取模拟绑定的当前值
    ///
    /// # 错误
    ///
    /// - [`IoError::UnknownBinding`]：名字未注册
    /// - [`IoError::NotAnalogInput`]：绑定的是布尔按键
    pub fn read_analog(&self, name: &str, frame: &InputFrame) -> Result<f64, IoError> {
        let button = self.buttons.get(name).ok_or_else(|| IoError::UnknownBinding {
            name: name.to_string(),
        })?;
        frame.analog_value(button).ok_or_else(|| IoError::NotAnalogInput {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{AnalogInput, BooleanInput};
    use crate::gamepad::{GamepadId, GamepadState};
    use crate::hub::InputHub;

    fn frame_with_a_pressed() -> InputFrame {
        let hub = InputHub::new();
        hub.publish(
            GamepadId::Primary,
            GamepadState {
                a: true,
                left_stick_y: -0.5,
                ..Default::default()
            },
        );
        hub.frame()
    }

    #[test]
    fn test_read_bool() {
        let mut bindings = ControlBindings::new();
        bindings.add_button("Select", Button::boolean(GamepadId::Primary, BooleanInput::A));

        let frame = frame_with_a_pressed();
        assert!(bindings.read_bool("Select", &frame).unwrap());
    }

    #[test]
    fn test_read_analog() {
        let mut bindings = ControlBindings::new();
        bindings.add_button(
            "Drive",
            Button::analog(GamepadId::Primary, AnalogInput::LeftStickY),
        );

        let frame = frame_with_a_pressed();
        assert_eq!(bindings.read_analog("Drive", &frame).unwrap(), -0.5);
    }

    #[test]
    fn test_kind_mismatch_errors() {
        let mut bindings = ControlBindings::new();
        bindings.add_button(
            "Drive",
            Button::analog(GamepadId::Primary, AnalogInput::LeftStickY),
        );
        bindings.add_button("Select", Button::boolean(GamepadId::Primary, BooleanInput::A));

        let frame = frame_with_a_pressed();
        assert!(matches!(
            bindings.read_bool("Drive", &frame),
            Err(IoError::NotBooleanInput { .. })
        ));
        assert!(matches!(
            bindings.read_analog("Select", &frame),
            Err(IoError::NotAnalogInput { .. })
        ));
    }

    #[test]
    fn test_unknown_binding() {
        let bindings = ControlBindings::new();
        let frame = frame_with_a_pressed();
        assert!(matches!(
            bindings.read_bool("Missing", &frame),
            Err(IoError::UnknownBinding { .. })
        ));
    }

    #[test]
    fn test_same_name_replaces() {
        let mut bindings = ControlBindings::new();
        bindings.add_button("Select", Button::boolean(GamepadId::Primary, BooleanInput::A));
        bindings.add_button("Select", Button::boolean(GamepadId::Primary, BooleanInput::B));

        assert_eq!(bindings.len(), 1);
        assert_eq!(
            bindings.button("Select"),
            Some(&Button::boolean(GamepadId::Primary, BooleanInput::B))
        );
    }
}
