//! 子系统运行上下文
//!
//! 每个生命周期钩子都拿到 `&mut RobotContext`：统一的输入快照、遥测
//! 通道与配置查询入口。子系统之间不直接通信，共享状态都经由上下文。

use std::collections::HashMap;
use std::sync::Arc;

use chassis_io::{ControlBindings, GamepadState, InputFrame, InputHub, Telemetry};

use crate::config::{RunMode, SharedConfig};
use crate::error::RobotError;

/// 传给子系统钩子的运行上下文
pub struct RobotContext {
    input: Arc<InputHub>,
    frame: InputFrame,
    telemetry: Telemetry,
    config: SharedConfig,
    run_mode: RunMode,
    standalone: bool,
}

impl RobotContext {
    pub(crate) fn new(
        input: Arc<InputHub>,
        telemetry: Telemetry,
        config: SharedConfig,
        run_mode: RunMode,
        standalone: bool,
    ) -> Self {
        let frame = input.frame();
        Self {
            input,
            frame,
            telemetry,
            config,
            run_mode,
            standalone,
        }
    }

    /// 拉取新一帧输入快照
    ///
    /// 每个阶段入口开始时调用一次，本周期内所有子系统看到同一帧。
    pub(crate) fn refresh_inputs(&mut self) {
        self.frame = self.input.frame();
    }

    /// 本周期的输入快照
    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }

    /// 输入枢纽句柄（宿主环境用来发布手柄状态）
    pub fn input_hub(&self) -> Arc<InputHub> {
        self.input.clone()
    }

    /// 主手柄状态
    pub fn gamepad1(&self) -> &GamepadState {
        &self.frame.pad1
    }

    /// 副手柄状态
    pub fn gamepad2(&self) -> &GamepadState {
        &self.frame.pad2
    }

    /// 遥测通道（克隆开销只有一次 Arc 计数）
    pub fn telemetry(&self) -> Telemetry {
        self.telemetry.clone()
    }

    /// 当前运行模式
    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// 是否独立配置模式（配置目标只指向当前模式的子目录）
    pub fn standalone(&self) -> bool {
        self.standalone
    }

    /// 共享配置注册表句柄
    pub(crate) fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// 该子系统手动参数里所有设备绑定的绑定表
    ///
    /// # 错误
    ///
    /// 子系统没有注册配置时返回 [`RobotError::UnknownSubsystemConfig`]。
    pub fn bound_controls(&self, subsystem: &str) -> Result<ControlBindings, RobotError> {
        self.config
            .read()
            .bound_controls(subsystem)
            .ok_or_else(|| RobotError::UnknownSubsystemConfig {
                name: subsystem.to_string(),
            })
    }

    /// 该子系统所有非设备参数的当前取值（键冲突时手动获胜）
    pub fn option_values(&self, subsystem: &str) -> HashMap<String, String> {
        self.config.read().option_values(subsystem)
    }
}
