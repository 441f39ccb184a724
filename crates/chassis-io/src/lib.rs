//! # Chassis IO - 输入设备与输出表面
//!
//! 本 crate 提供控制循环与宿主环境之间的 IO 边界，包括：
//! - 手柄快照（`GamepadState`）与跨线程快照发布（`InputHub`，ArcSwap 无锁读取）
//! - 按键绑定（`Button` / `ControlBindings`）
//! - 文本输出表面（`TelemetrySink` / `Telemetry` 共享句柄）
//!
//! # 线程模型
//!
//! 宿主环境在独立线程上更新手柄状态，控制循环在每个阶段开始时通过
//! [`InputHub::frame`] 原子地获取一份完整快照。循环内读取的永远是
//! 同一份快照，不会观察到部分更新。
//!
//! # Feature Flags
//!
//! - `serde` - 为 POD 类型（`GamepadState`、`Button` 等）启用序列化支持

mod bindings;
mod button;
mod error;
mod gamepad;
mod hub;
mod telemetry;

pub use bindings::ControlBindings;
pub use button::{AnalogInput, BooleanInput, Button, ButtonInput};
pub use error::IoError;
pub use gamepad::{GamepadId, GamepadState};
pub use hub::{InputFrame, InputHub};
pub use telemetry::{MemorySink, Telemetry, TelemetrySink};
