//! 按键与控件绑定类型
//!
//! `Button` 把一个可读控件（布尔按键或模拟轴）定位到某只手柄上。
//! 配置编辑器通过 [`BooleanInput::ALL`] / [`BooleanInput::next`] 在候选
//! 按键之间循环切换绑定。

use crate::gamepad::GamepadId;

/// 布尔控件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanInput {
    A,
    B,
    X,
    Y,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftBumper,
    RightBumper,
    LeftStickButton,
    RightStickButton,
    Back,
    Start,
    /// 无按键（永远读出 `false`）
    ///
    /// 用于自动创建的配置 MenuHost 的循环控件：该 MenuHost 只有一个
    /// 菜单，不需要真实按键。
    None,
}

impl BooleanInput {
    /// 可配置的按键候选列表（不含 `None`）
    pub const ALL: [BooleanInput; 14] = [
        BooleanInput::A,
        BooleanInput::B,
        BooleanInput::X,
        BooleanInput::Y,
        BooleanInput::DpadUp,
        BooleanInput::DpadDown,
        BooleanInput::DpadLeft,
        BooleanInput::DpadRight,
        BooleanInput::LeftBumper,
        BooleanInput::RightBumper,
        BooleanInput::LeftStickButton,
        BooleanInput::RightStickButton,
        BooleanInput::Back,
        BooleanInput::Start,
    ];

    /// 返回候选列表中的下一个按键（循环）
    ///
    /// `None` 的下一个是列表第一项。
    pub fn next(self) -> Self {
        match Self::ALL.iter().position(|&b| b == self) {
            Some(idx) => Self::ALL[(idx + 1) % Self::ALL.len()],
            None => Self::ALL[0],
        }
    }
}

/// 模拟控件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalogInput {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

/// 控件种类（布尔或模拟）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonInput {
    Bool(BooleanInput),
    Analog(AnalogInput),
}

/// 定位到某只手柄的可读控件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Button {
    /// 控件所在的手柄
    pub gamepad: GamepadId,
    /// 控件种类
    pub input: ButtonInput,
}

impl Button {
    /// 布尔按键
    pub fn boolean(gamepad: GamepadId, input: BooleanInput) -> Self {
        Self {
            gamepad,
            input: ButtonInput::Bool(input),
        }
    }

    /// 模拟轴
    pub fn analog(gamepad: GamepadId, input: AnalogInput) -> Self {
        Self {
            gamepad,
            input: ButtonInput::Analog(input),
        }
    }

    /// 无按键占位（布尔，永远读出 `false`）
    pub fn none(gamepad: GamepadId) -> Self {
        Self::boolean(gamepad, BooleanInput::None)
    }

    /// 是否为布尔控件
    pub fn is_boolean(&self) -> bool {
        matches!(self.input, ButtonInput::Bool(_))
    }
}
