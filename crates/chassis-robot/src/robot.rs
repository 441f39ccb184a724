//! Orchestrator：子系统生命周期驱动与故障隔离
//!
//! [`Robot`] 由 [`RobotBuilder`](crate::RobotBuilder) 构造。宿主环境按
//! 自己的节拍调用四个阶段入口；每个入口先拉取本周期的输入快照，再
//! 依次驱动所有子系统的对应钩子。
//!
//! # 故障隔离
//!
//! 单个子系统钩子返回 `Err` 时记录一条结构化日志、往遥测表面追加一行
//! 诊断，然后继续驱动其余子系统。阶段入口本身从不因子系统错误失败。

use std::path::PathBuf;

use chassis_gui::MenuHost;
use chassis_io::ControlBindings;
use tracing::{error, info, warn};

use crate::context::RobotContext;
use crate::error::RobotError;
use crate::storage::{config_root, ensure_config_tree, write_manifests};
use crate::subsystem::Subsystem;

/// 自动创建的配置 MenuHost 里唯一菜单的注册名
pub(crate) const CONFIG_MENU: &str = "config";

/// 子系统生命周期 Orchestrator
pub struct Robot {
    pub(crate) name: String,
    pub(crate) subsystems: Vec<(String, Box<dyn Subsystem>)>,
    pub(crate) ctx: RobotContext,
    pub(crate) gui: Option<MenuHost>,
    pub(crate) config_gui: Option<MenuHost>,
    pub(crate) use_config: bool,
    /// 配置 GUI 当前是否在绘制（进入手动阶段或编辑完成时关闭）
    pub(crate) config_open: bool,
    pub(crate) base_dir: PathBuf,
}

impl Robot {
    /// 机器人名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 配置根目录：`<base>/robot_<name>`
    pub fn config_dir(&self) -> PathBuf {
        config_root(&self.base_dir, &self.name)
    }

    /// 运行上下文（只读）
    pub fn context(&self) -> &RobotContext {
        &self.ctx
    }

    /// 输入枢纽句柄（宿主环境用来发布手柄状态）
    pub fn input_hub(&self) -> std::sync::Arc<chassis_io::InputHub> {
        self.ctx.input_hub()
    }

    /// 主 GUI（可变，用于添加/移除菜单）
    pub fn gui_mut(&mut self) -> Option<&mut MenuHost> {
        self.gui.as_mut()
    }

    /// 按名字查子系统
    pub fn subsystem(&self, name: &str) -> Option<&dyn Subsystem> {
        self.subsystems
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.as_ref())
    }

    /// 按名字查子系统（可变）
    pub fn subsystem_mut(&mut self, name: &str) -> Option<&mut Box<dyn Subsystem>> {
        self.subsystems
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// 替换（或追加）一个命名子系统并重新运行能力发现
    ///
    /// 新实例的配置描述符整体替换同名旧条目；描述符格式错误时记录
    /// 警告，该子系统没有可用配置，替换本身仍然生效。
    pub fn replace_subsystem(&mut self, name: impl Into<String>, subsystem: Box<dyn Subsystem>) {
        let name = name.into();
        if let Some(descriptor) = subsystem.config_descriptor()
            && let Err(err) = self.ctx.config().write().register(&name, descriptor)
        {
            warn!(subsystem = %name, error = %err, "Rejected malformed config descriptor");
        }
        match self.subsystems.iter_mut().find(|(n, _)| n == &name) {
            Some(slot) => slot.1 = subsystem,
            None => self.subsystems.push((name, subsystem)),
        }
    }

    /// 该子系统手动参数里所有设备绑定的绑定表
    pub fn bound_controls(&self, subsystem: &str) -> Result<ControlBindings, RobotError> {
        self.ctx.bound_controls(subsystem)
    }

    /// 该子系统所有非设备参数的当前取值（键冲突时手动获胜）
    pub fn option_values(&self, subsystem: &str) -> std::collections::HashMap<String, String> {
        self.ctx.option_values(subsystem)
    }

    /// 一次性装载阶段
    ///
    /// 启动主 GUI、准备配置目录树与清单、打开配置 GUI，然后驱动所有
    /// 子系统的 `init`。存储 I/O 失败只记录日志，装载继续（无配置持久
    /// 化地照常运行）。
    pub fn init(&mut self) {
        self.ctx.refresh_inputs();
        info!(robot = %self.name, "Initializing robot");

        if let Some(gui) = self.gui.as_mut() {
            gui.start();
        }

        if self.use_config {
            let root = self.config_dir();
            let type_names = self.ctx.config().read().type_names();
            if let Err(err) = ensure_config_tree(&root)
                .and_then(|()| write_manifests(&root, &type_names))
            {
                warn!(error = %err, "Config storage unavailable; continuing without persistence");
            }
            if let Some(cfg) = self.config_gui.as_mut() {
                cfg.start();
                self.config_open = true;
            }
        }

        self.run_phase("init", |s, ctx| s.init(ctx));
    }

    /// 运行开始前的重复准备阶段
    ///
    /// 配置 GUI 打开期间每周期重绘一次；编辑完成（`[Done]`）后就地
    /// 关闭。
    pub fn init_loop(&mut self) {
        self.ctx.refresh_inputs();

        if self.config_open
            && let Some(cfg) = self.config_gui.as_mut()
        {
            if let Err(err) = cfg.draw_current_menu() {
                error!(error = %err, "Config GUI draw failed");
            }
            if cfg.menu(CONFIG_MENU).map(|m| m.is_done()).unwrap_or(false) {
                cfg.stop();
                self.config_open = false;
            }
        }

        self.run_phase("init_loop", |s, ctx| s.init_loop(ctx));
    }

    /// 手动操作阶段的每周期入口
    ///
    /// 首个周期关闭仍然打开的配置 GUI（编辑器没按 `[Done]` 也要让位
    /// 给主 GUI），然后重绘主 GUI 并驱动所有子系统的 `handle`。
    pub fn driver_controlled_update(&mut self) {
        self.ctx.refresh_inputs();

        if self.config_open {
            if let Some(cfg) = self.config_gui.as_mut() {
                cfg.stop();
            }
            self.config_open = false;
        }

        if let Some(gui) = self.gui.as_mut()
            && gui.menu_count() > 0
            && let Err(err) = gui.draw_current_menu()
        {
            error!(error = %err, "GUI draw failed");
        }

        self.run_phase("handle", |s, ctx| s.handle(ctx));
    }

    /// 停止阶段
    pub fn stop_all(&mut self) {
        info!(robot = %self.name, "Stopping robot");

        if let Some(gui) = self.gui.as_mut() {
            gui.stop();
        }
        if self.config_open {
            if let Some(cfg) = self.config_gui.as_mut() {
                cfg.stop();
            }
            self.config_open = false;
        }

        self.run_phase("stop", |s, ctx| s.stop(ctx));
    }

    /// 依次驱动所有子系统的某个钩子，逐子系统隔离故障
    fn run_phase(
        &mut self,
        phase: &str,
        mut hook: impl FnMut(&mut Box<dyn Subsystem>, &mut RobotContext) -> anyhow::Result<()>,
    ) {
        for (name, subsystem) in self.subsystems.iter_mut() {
            if let Err(err) = hook(subsystem, &mut self.ctx) {
                error!(subsystem = %name, phase, error = %err, "Subsystem hook failed");
                self.ctx
                    .telemetry()
                    .add_data("Error", format!("{name} {phase}: {err:#}"));
            }
        }
    }
}
