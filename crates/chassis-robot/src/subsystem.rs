//! 子系统能力抽象
//!
//! 子系统是一个有 init / init_loop / handle / stop 生命周期的机器人
//! 行为单元。Orchestrator 每周期依次驱动所有子系统的当前阶段钩子，
//! 任何一个钩子返回错误都只影响它自己（见 `Robot` 的故障隔离策略）。

use anyhow::Result;

use crate::config::ConfigParam;
use crate::context::RobotContext;

/// 子系统声明的配置模式
///
/// 替代来源实现里基于注解扫描的运行时反射：每个需要配置的子系统
/// 类型显式给出自己的描述符，注册时由 Orchestrator 查询一次。
#[derive(Debug, Clone)]
pub struct ConfigDescriptor {
    /// 类型名（写入清单文件，供外部配置调试器使用）
    pub type_name: &'static str,
    /// 手动阶段的配置参数
    pub teleop: Vec<ConfigParam>,
    /// 自动阶段的配置参数
    pub autonomous: Vec<ConfigParam>,
}

impl ConfigDescriptor {
    /// 创建描述符
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            teleop: Vec::new(),
            autonomous: Vec::new(),
        }
    }

    /// 追加手动阶段参数（链式）
    pub fn with_teleop(mut self, params: Vec<ConfigParam>) -> Self {
        self.teleop = params;
        self
    }

    /// 追加自动阶段参数（链式）
    pub fn with_autonomous(mut self, params: Vec<ConfigParam>) -> Self {
        self.autonomous = params;
        self
    }
}

/// 机器人行为单元
///
/// # 生命周期
///
/// - `init`: 一次性装载阶段
/// - `init_loop`: 运行开始前每周期调用
/// - `handle`: 手动操作阶段每周期调用
/// - `stop`: 停止阶段调用
///
/// 钩子返回 `Err` 时由 Orchestrator 记录诊断并继续驱动其余子系统。
pub trait Subsystem: Send {
    /// 一次性装载
    fn init(&mut self, ctx: &mut RobotContext) -> Result<()>;

    /// 运行开始前的重复准备阶段
    fn init_loop(&mut self, ctx: &mut RobotContext) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// 手动操作阶段的每周期处理
    fn handle(&mut self, ctx: &mut RobotContext) -> Result<()>;

    /// 停止
    fn stop(&mut self, ctx: &mut RobotContext) -> Result<()>;

    /// 声明配置模式（能力发现入口）
    ///
    /// 返回 `None` 表示子系统不使用配置。
    fn config_descriptor(&self) -> Option<ConfigDescriptor> {
        None
    }

    /// 是否使用配置
    fn uses_config(&self) -> bool {
        self.config_descriptor().is_some()
    }
}
