//! # Chassis Control - 闭环控制原语
//!
//! 提供子系统用来跟踪设定值的 PID 控制器，支持三种调校变体：
//!
//! - **Standard**: 经典 PID，`P` 每次从瞬时误差重算
//! - **FeedForward**: 在 Standard 基础上叠加 `F = kf · setpoint` 前馈项
//! - **POnM**: "proportional on measurement"，`P` 对测量值变化量累积，
//!   避免设定值跳变时的比例/微分冲击
//!
//! # 示例
//!
//! ```rust
//! use chassis_control::PidController;
//!
//! let mut pid = PidController::new(0.8, 0.1, 0.05);
//! pid.init(100.0, 0.0);
//! pid.set_output_clamp(-1.0, 1.0);
//!
//! // 控制循环中每个周期调用
//! let power = pid.correction(12.5);
//! assert!((-1.0..=1.0).contains(&power));
//! ```

mod pid;

pub use pid::{ErrorFn, PidController, PidMode};
