//! Robot 构造器
//!
//! 注册阶段完成能力发现（查询每个子系统的配置描述符），`build` 时
//! 组装上下文、主 GUI 与自动创建的配置 GUI。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chassis_gui::{Cursor, Menu, MenuHost};
use chassis_io::{BooleanInput, Button, GamepadId, InputHub, Telemetry};
use parking_lot::RwLock;
use tracing::warn;

use crate::config::{ConfigRegistry, RunMode, SharedConfig};
use crate::config_menu::{ConfigMenu, ConfigTarget};
use crate::context::RobotContext;
use crate::error::RobotError;
use crate::robot::{Robot, CONFIG_MENU};
use crate::storage::config_root;
use crate::subsystem::Subsystem;

/// 光标闪烁周期
const BLINK_PERIOD: Duration = Duration::from_millis(500);

/// [`Robot`] 构造器
///
/// # 示例
///
/// ```rust,no_run
/// use chassis_io::{BooleanInput, Button, GamepadId, MemorySink, Telemetry};
/// use chassis_robot::RobotBuilder;
///
/// let mut builder = RobotBuilder::new("demo", Telemetry::new(MemorySink::new()));
/// builder.start_gui(Button::boolean(GamepadId::Primary, BooleanInput::Back)).unwrap();
/// let robot = builder.build();
/// ```
pub struct RobotBuilder {
    name: String,
    telemetry: Telemetry,
    input: Arc<InputHub>,
    base_dir: PathBuf,
    run_mode: RunMode,
    standalone: bool,
    config: SharedConfig,
    subsystems: Vec<(String, Box<dyn Subsystem>)>,
    gui: Option<MenuHost>,
    use_config: bool,
}

impl RobotBuilder {
    /// 创建构造器
    ///
    /// 输入枢纽在内部创建，宿主环境通过
    /// [`Robot::input_hub`](crate::Robot::input_hub) 发布手柄状态。
    pub fn new(name: impl Into<String>, telemetry: Telemetry) -> Self {
        Self {
            name: name.into(),
            telemetry,
            input: Arc::new(InputHub::new()),
            base_dir: std::env::temp_dir().join("chassis"),
            run_mode: RunMode::default(),
            standalone: false,
            config: Arc::new(RwLock::new(ConfigRegistry::new())),
            subsystems: Vec::new(),
            gui: None,
            use_config: false,
        }
    }

    /// 配置持久化的基目录（链式）
    ///
    /// 默认 `<系统临时目录>/chassis`。
    pub fn with_base_dir(mut self, base_dir: PathBuf) -> Self {
        self.base_dir = base_dir;
        self
    }

    /// 运行模式（链式）
    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    /// 独立配置模式（链式）
    ///
    /// 打开后配置编辑器只编辑当前运行模式的参数，取值直接写入该
    /// 模式的子目录。
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// 注册一个命名子系统并运行能力发现
    ///
    /// 同名重复注册替换旧实例。描述符格式错误时记录警告，该子系统
    /// 没有可用配置，注册本身仍然生效。
    pub fn register(&mut self, name: impl Into<String>, subsystem: Box<dyn Subsystem>) {
        let name = name.into();
        if let Some(descriptor) = subsystem.config_descriptor() {
            match self.config.write().register(&name, descriptor) {
                Ok(()) => self.use_config = true,
                Err(err) => {
                    warn!(subsystem = %name, error = %err, "Rejected malformed config descriptor");
                }
            }
        }
        match self.subsystems.iter_mut().find(|(n, _)| n == &name) {
            Some(slot) => slot.1 = subsystem,
            None => self.subsystems.push((name, subsystem)),
        }
    }

    /// 启动主 GUI
    ///
    /// # 错误
    ///
    /// `cycle_button` 不是布尔控件时快速失败
    /// （[`chassis_gui::GuiError::NotBooleanInput`]）。
    pub fn start_gui(&mut self, cycle_button: Button) -> Result<(), RobotError> {
        let cursor = Cursor::new(BLINK_PERIOD).with_nav(
            Button::boolean(GamepadId::Primary, BooleanInput::DpadUp),
            Button::boolean(GamepadId::Primary, BooleanInput::DpadDown),
        );
        self.gui = Some(MenuHost::new(
            self.telemetry.clone(),
            self.input.clone(),
            cursor,
            cycle_button,
        )?);
        Ok(())
    }

    /// 往主 GUI 注册菜单
    ///
    /// # 错误
    ///
    /// 必须先调用 [`start_gui`](Self::start_gui)，否则返回
    /// [`RobotError::GuiNotStarted`]。
    pub fn add_menu(&mut self, name: impl Into<String>, menu: Box<dyn Menu>) -> Result<(), RobotError> {
        let gui = self.gui.as_mut().ok_or(RobotError::GuiNotStarted)?;
        gui.add_menu(name, menu);
        Ok(())
    }

    /// 组装 [`Robot`]
    ///
    /// 至少一个子系统声明了配置时自动创建配置 GUI：单菜单、无循环
    /// 按键（[`Button::none`]）、方向键上下导航、A 键编辑。
    pub fn build(self) -> Robot {
        let ctx = RobotContext::new(
            self.input.clone(),
            self.telemetry.clone(),
            self.config.clone(),
            self.run_mode,
            self.standalone,
        );

        let config_gui = if self.use_config {
            self.build_config_gui()
        } else {
            None
        };

        Robot {
            name: self.name,
            subsystems: self.subsystems,
            ctx,
            gui: self.gui,
            config_gui,
            use_config: self.use_config,
            config_open: false,
            base_dir: self.base_dir,
        }
    }

    fn build_config_gui(&self) -> Option<MenuHost> {
        let root = config_root(&self.base_dir, &self.name);
        let target = if self.standalone {
            ConfigTarget::ModeDir(root.join(self.run_mode.dir_name()), self.run_mode)
        } else {
            ConfigTarget::Combined(root)
        };
        let menu = ConfigMenu::new(
            self.config.clone(),
            target,
            Button::boolean(GamepadId::Primary, BooleanInput::A),
        );

        let cursor = Cursor::new(BLINK_PERIOD).with_nav(
            Button::boolean(GamepadId::Primary, BooleanInput::DpadUp),
            Button::boolean(GamepadId::Primary, BooleanInput::DpadDown),
        );
        // 单菜单宿主不需要真实的循环按键
        match MenuHost::new(
            self.telemetry.clone(),
            self.input.clone(),
            cursor,
            Button::none(GamepadId::Primary),
        ) {
            Ok(mut host) => {
                host.add_menu(CONFIG_MENU, Box::new(menu));
                Some(host)
            }
            Err(err) => {
                warn!(error = %err, "Config GUI unavailable");
                None
            }
        }
    }
}
