//! # Chassis SDK - 竞赛机器人控制运行时统一入口
//!
//! 把四个功能 crate 汇聚成一个依赖：
//!
//! - [`io`]: 手柄快照、按键绑定、遥测输出表面
//! - [`control`]: PID 控制器（Standard / FeedForward / POnM）
//! - [`gui`]: MenuHost / Menu / Cursor 呈现层
//! - [`robot`]: Orchestrator、子系统生命周期、配置发现与持久化
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use chassis_sdk::prelude::*;
//!
//! chassis_sdk::init_logging();
//!
//! let mut builder = RobotBuilder::new("demo", Telemetry::new(MemorySink::new()));
//! builder
//!     .start_gui(Button::boolean(GamepadId::Primary, BooleanInput::Back))
//!     .unwrap();
//! let mut robot = builder.build();
//!
//! robot.init();
//! loop {
//!     robot.driver_controlled_update();
//!     # break;
//! }
//! robot.stop_all();
//! ```
//!
//! # 日志
//!
//! 运行时内部用 `tracing` 宏记录故障隔离与存储诊断。[`init_logging`]
//! 安装 `tracing-subscriber` 的 fmt 输出（`RUST_LOG` 环境变量过滤）并
//! 桥接 `log` 宏的输出。

pub use chassis_control as control;
pub use chassis_gui as gui;
pub use chassis_io as io;
pub use chassis_robot as robot;

// 常用类型的平铺 re-export
pub use chassis_control::{PidController, PidMode};
pub use chassis_gui::{Cursor, DisplayMenu, GuiError, GuiLine, Menu, MenuHost};
pub use chassis_io::{
    AnalogInput, BooleanInput, Button, ControlBindings, GamepadId, GamepadState, InputFrame,
    InputHub, IoError, MemorySink, Telemetry, TelemetrySink,
};
pub use chassis_robot::{
    ConfigDescriptor, ConfigParam, Robot, RobotBuilder, RobotContext, RobotError, RunMode,
    Subsystem,
};

/// 一次引入最常用的类型
pub mod prelude {
    pub use chassis_control::{PidController, PidMode};
    pub use chassis_gui::{Cursor, DisplayMenu, GuiLine, Menu, MenuHost};
    pub use chassis_io::{
        AnalogInput, BooleanInput, Button, ControlBindings, GamepadId, GamepadState, InputFrame,
        InputHub, MemorySink, Telemetry, TelemetrySink,
    };
    pub use chassis_robot::{
        ConfigDescriptor, ConfigParam, Robot, RobotBuilder, RobotContext, RunMode, Subsystem,
    };
}

/// 用默认环境过滤器初始化日志（`RUST_LOG`）
///
/// 重复调用按无操作处理，集成测试里多个用例可以各自调用。
pub fn init_logging() {
    init_logging_with_filter(tracing_subscriber::EnvFilter::from_default_env());
}

/// 用指定过滤器初始化日志
pub fn init_logging_with_filter(filter: tracing_subscriber::EnvFilter) {
    // log 宏 → tracing 事件桥
    let _ = tracing_log::LogTracer::init();
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
