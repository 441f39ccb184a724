//! 跨线程输入快照发布
//!
//! 宿主环境在独立线程上更新手柄状态；控制循环必须在每个阶段开始时
//! 重新读取快照，且绝不能观察到半更新状态。这里用 `ArcSwap` 做原子
//! 指针交换：发布方整体替换快照，读取方 `load_full` 拿到一致的一份。

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::button::{Button, ButtonInput};
use crate::gamepad::{GamepadId, GamepadState};

/// 输入快照中心
///
/// 每只手柄一个 `ArcSwap` 槽位。
///
/// # 线程安全
///
/// - [`publish`](InputHub::publish)：宿主线程调用，整体替换快照
/// - [`frame`](InputHub::frame)：控制循环调用，无锁读取
///
/// # 示例
///
/// ```rust
/// use chassis_io::{GamepadId, GamepadState, InputHub};
///
/// let hub = InputHub::new();
///
/// // 宿主线程：发布新快照
/// hub.publish(GamepadId::Primary, GamepadState { a: true, ..Default::default() });
///
/// // 控制循环：读取本阶段的一致快照
/// let frame = hub.frame();
/// assert!(frame.pad1.a);
/// ```
#[derive(Debug, Default)]
pub struct InputHub {
    pad1: ArcSwap<GamepadState>,
    pad2: ArcSwap<GamepadState>,
}

/// 一个控制循环阶段内使用的输入快照对
///
/// 两份快照在阶段开始时一次性取出，阶段内所有读取都来自同一份数据。
#[derive(Debug, Clone)]
pub struct InputFrame {
    /// 主手柄快照
    pub pad1: Arc<GamepadState>,
    /// 副手柄快照
    pub pad2: Arc<GamepadState>,
}

impl InputHub {
    /// 创建输入中心（初始快照为全部松开）
    pub fn new() -> Self {
        Self::default()
    }

    /// 发布一只手柄的新快照（宿主线程调用）
    pub fn publish(&self, id: GamepadId, state: GamepadState) {
        let slot = match id {
            GamepadId::Primary => &self.pad1,
            GamepadId::Secondary => &self.pad2,
        };
        slot.store(Arc::new(state));
    }

    /// 取出当前快照对（控制循环每阶段开始调用一次）
    pub fn frame(&self) -> InputFrame {
        InputFrame {
            pad1: self.pad1.load_full(),
            pad2: self.pad2.load_full(),
        }
    }
}

impl InputFrame {
    fn pad(&self, id: GamepadId) -> &GamepadState {
        match id {
            GamepadId::Primary => &self.pad1,
            GamepadId::Secondary => &self.pad2,
        }
    }

    /// 读取布尔按键的值；模拟控件返回 `None`
    pub fn bool_value(&self, button: &Button) -> Option<bool> {
        match button.input {
            ButtonInput::Bool(input) => Some(self.pad(button.gamepad).read_bool(input)),
            ButtonInput::Analog(_) => None,
        }
    }

    /// 读取模拟控件的值；布尔按键返回 `None`
    pub fn analog_value(&self, button: &Button) -> Option<f64> {
        match button.input {
            ButtonInput::Analog(input) => Some(self.pad(button.gamepad).read_analog(input)),
            ButtonInput::Bool(_) => None,
        }
    }
}
