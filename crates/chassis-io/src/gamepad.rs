//! 手柄状态快照
//!
//! `GamepadState` 是一份纯数据（POD）快照：宿主环境在自己的线程上构造
//! 新快照并通过 [`InputHub`](crate::InputHub) 发布，控制循环只读。

use crate::button::{AnalogInput, BooleanInput};

/// 手柄标识
///
/// 竞赛环境最多接入两只手柄。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamepadId {
    /// 主手柄（驾驶员）
    Primary,
    /// 副手柄（操作手）
    Secondary,
}

/// 一只手柄在某一时刻的完整状态
///
/// # 设计
///
/// 所有字段公开，宿主绑定层直接填充。`Default` 表示所有按键松开、
/// 摇杆回中、扳机归零。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GamepadState {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub left_bumper: bool,
    pub right_bumper: bool,
    pub left_stick_button: bool,
    pub right_stick_button: bool,
    pub back: bool,
    pub start: bool,

    pub left_stick_x: f64,
    pub left_stick_y: f64,
    pub right_stick_x: f64,
    pub right_stick_y: f64,
    pub left_trigger: f64,
    pub right_trigger: f64,
}

impl GamepadState {
    /// 读取布尔控件的当前值
    ///
    /// `BooleanInput::None` 永远返回 `false`，用于"无按键"占位绑定。
    pub fn read_bool(&self, input: BooleanInput) -> bool {
        match input {
            BooleanInput::A => self.a,
            BooleanInput::B => self.b,
            BooleanInput::X => self.x,
            BooleanInput::Y => self.y,
            BooleanInput::DpadUp => self.dpad_up,
            BooleanInput::DpadDown => self.dpad_down,
            BooleanInput::DpadLeft => self.dpad_left,
            BooleanInput::DpadRight => self.dpad_right,
            BooleanInput::LeftBumper => self.left_bumper,
            BooleanInput::RightBumper => self.right_bumper,
            BooleanInput::LeftStickButton => self.left_stick_button,
            BooleanInput::RightStickButton => self.right_stick_button,
            BooleanInput::Back => self.back,
            BooleanInput::Start => self.start,
            BooleanInput::None => false,
        }
    }

    /// 读取模拟控件的当前值
    pub fn read_analog(&self, input: AnalogInput) -> f64 {
        match input {
            AnalogInput::LeftStickX => self.left_stick_x,
            AnalogInput::LeftStickY => self.left_stick_y,
            AnalogInput::RightStickX => self.right_stick_x,
            AnalogInput::RightStickY => self.right_stick_y,
            AnalogInput::LeftTrigger => self.left_trigger,
            AnalogInput::RightTrigger => self.right_trigger,
        }
    }
}
