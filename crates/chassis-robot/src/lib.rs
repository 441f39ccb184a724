//! # Chassis Robot - 子系统生命周期编排
//!
//! 本 crate 提供运行时核心 Orchestrator（[`Robot`]），包括：
//! - 命名子系统注册表，每周期驱动 init / init_loop / handle / stop 生命周期
//! - 逐子系统故障隔离：单个子系统出错只记录诊断，绝不中断整个周期
//! - 配置能力发现（显式静态描述符，见 [`Subsystem::config_descriptor`]）
//!   与持久化配置的编排
//! - 最多两个 MenuHost：主 GUI（实时遥测）+ 自动创建的配置编辑 GUI
//!
//! # 调度模型
//!
//! 单逻辑控制循环：宿主环境按自己的节拍依次调用
//! [`Robot::init`]、[`Robot::init_loop`]、[`Robot::driver_controlled_update`]、
//! [`Robot::stop_all`]。所有阶段入口都在本次调用内完成全部工作，不阻塞
//! 不挂起。挂死的子系统调用无法被抢占，这是文档化的限制。

mod builder;
mod config;
mod config_menu;
mod context;
mod error;
mod robot;
mod storage;
mod subsystem;

pub use builder::RobotBuilder;
pub use config::{ConfigEntry, ConfigParam, ConfigRegistry, ParamKind, RunMode, SharedConfig};
pub use config_menu::{ConfigMenu, ConfigTarget};
pub use context::RobotContext;
pub use error::RobotError;
pub use robot::Robot;
pub use storage::{SavedConfig, MANIFEST_FILE};
pub use subsystem::{ConfigDescriptor, Subsystem};
