//! 配置参数与配置注册表
//!
//! 子系统通过描述符声明两份不可变参数列表（手动 / 自动）。注册表由
//! Orchestrator 实例持有（通过 [`SharedConfig`] 句柄与配置菜单共享），
//! 不是进程级全局状态；生命周期随 Orchestrator 结束。

use std::collections::HashMap;
use std::sync::Arc;

use chassis_io::{Button, ButtonInput, ControlBindings};
use parking_lot::RwLock;

use crate::error::RobotError;
use crate::storage::SavedConfig;
use crate::subsystem::ConfigDescriptor;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// 手动（驾驶员控制）
    #[default]
    Teleop,
    /// 自动
    Autonomous,
}

impl RunMode {
    /// 持久化子目录名
    pub fn dir_name(self) -> &'static str {
        match self {
            RunMode::Teleop => "teleop",
            RunMode::Autonomous => "autonomous",
        }
    }
}

/// 参数种类
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// 字符串选项（在候选列表中循环）
    Options {
        /// 候选值
        options: Vec<String>,
        /// 当前值
        current: String,
    },
    /// 绑定到输入设备控件
    Bound {
        /// 当前绑定
        button: Button,
    },
}

/// 一条命名配置参数
///
/// 身份 = (子系统注册名, 参数名)。
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigParam {
    /// 参数名
    pub name: String,
    /// 参数种类
    pub kind: ParamKind,
}

impl ConfigParam {
    /// 选项型参数
    ///
    /// `default` 必须是 `options` 之一（注册时校验）。
    pub fn options(
        name: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Options {
                options: options.into_iter().map(Into::into).collect(),
                current: default.into(),
            },
        }
    }

    /// 设备绑定型参数
    pub fn bound(name: impl Into<String>, button: Button) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Bound { button },
        }
    }

    /// 是否绑定输入设备
    pub fn uses_device(&self) -> bool {
        matches!(self.kind, ParamKind::Bound { .. })
    }

    /// 当前值的显示文本
    pub fn display_value(&self) -> String {
        match &self.kind {
            ParamKind::Options { current, .. } => current.clone(),
            ParamKind::Bound { button } => format!("{:?}", button.input),
        }
    }

    /// 循环到下一个取值
    ///
    /// 选项型：候选列表中的下一项（回绕）。绑定型：下一个布尔按键；
    /// 模拟绑定不可循环（设备轴在代码里固定）。
    pub fn cycle(&mut self) {
        match &mut self.kind {
            ParamKind::Options { options, current } => {
                let idx = options.iter().position(|o| o == current).unwrap_or(0);
                *current = options[(idx + 1) % options.len()].clone();
            }
            ParamKind::Bound { button } => {
                if let ButtonInput::Bool(input) = button.input {
                    button.input = ButtonInput::Bool(input.next());
                }
            }
        }
    }
}

/// 注册表中一个子系统的配置条目
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    /// 声明方的类型名
    pub type_name: String,
    /// 参数列表
    pub params: Vec<ConfigParam>,
}

/// 配置注册表（手动 / 自动两张表）
///
/// 键为子系统注册名；同名重新注册整体替换旧条目，因此清单不会出现
/// 重复项。
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    teleop: HashMap<String, ConfigEntry>,
    autonomous: HashMap<String, ConfigEntry>,
    /// 配置子系统的注册顺序（清单与菜单的确定性顺序）
    order: Vec<String>,
}

/// Orchestrator 与配置菜单共享的注册表句柄
pub type SharedConfig = Arc<RwLock<ConfigRegistry>>;

fn validate_params(subsystem: &str, params: &[ConfigParam]) -> Result<(), RobotError> {
    for (idx, param) in params.iter().enumerate() {
        if params[..idx].iter().any(|p| p.name == param.name) {
            return Err(RobotError::DuplicateParam {
                subsystem: subsystem.to_string(),
                param: param.name.clone(),
            });
        }
        if let ParamKind::Options { options, current } = &param.kind {
            if options.is_empty() {
                return Err(RobotError::EmptyOptions {
                    param: param.name.clone(),
                });
            }
            if !options.contains(current) {
                return Err(RobotError::InvalidDefault {
                    param: param.name.clone(),
                    value: current.clone(),
                });
            }
        }
    }
    Ok(())
}

impl ConfigRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册（或替换）一个子系统的描述符
    ///
    /// # 错误
    ///
    /// 描述符格式错误（重复参数名、空候选列表、非法默认值）时整体
    /// 拒绝，旧条目保持不变 — 调用方记录日志后继续，该子系统没有
    /// 可用配置。
    pub fn register(&mut self, name: &str, descriptor: ConfigDescriptor) -> Result<(), RobotError> {
        validate_params(name, &descriptor.teleop)?;
        validate_params(name, &descriptor.autonomous)?;

        self.teleop.remove(name);
        self.autonomous.remove(name);
        self.order.retain(|n| n != name);

        let has_any = !descriptor.teleop.is_empty() || !descriptor.autonomous.is_empty();
        if !descriptor.teleop.is_empty() {
            self.teleop.insert(
                name.to_string(),
                ConfigEntry {
                    type_name: descriptor.type_name.to_string(),
                    params: descriptor.teleop,
                },
            );
        }
        if !descriptor.autonomous.is_empty() {
            self.autonomous.insert(
                name.to_string(),
                ConfigEntry {
                    type_name: descriptor.type_name.to_string(),
                    params: descriptor.autonomous,
                },
            );
        }
        if has_any {
            self.order.push(name.to_string());
        }
        Ok(())
    }

    /// 配置子系统的注册名（注册顺序）
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// 清单内容：每个配置子系统的类型名（注册顺序）
    pub fn type_names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|name| {
                self.teleop
                    .get(name)
                    .or_else(|| self.autonomous.get(name))
                    .map(|entry| entry.type_name.clone())
            })
            .collect()
    }

    /// 是否没有任何配置子系统
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 查询某模式下的配置条目
    pub fn entry(&self, name: &str, mode: RunMode) -> Option<&ConfigEntry> {
        match mode {
            RunMode::Teleop => self.teleop.get(name),
            RunMode::Autonomous => self.autonomous.get(name),
        }
    }

    fn entry_mut(&mut self, name: &str, mode: RunMode) -> Option<&mut ConfigEntry> {
        match mode {
            RunMode::Teleop => self.teleop.get_mut(name),
            RunMode::Autonomous => self.autonomous.get_mut(name),
        }
    }

    /// 循环指定参数的取值（配置菜单的编辑动作）
    pub fn cycle_param(&mut self, name: &str, mode: RunMode, idx: usize) {
        if let Some(entry) = self.entry_mut(name, mode)
            && let Some(param) = entry.params.get_mut(idx)
        {
            param.cycle();
        }
    }

    /// 把持久化的取值应用回注册表
    ///
    /// 未知参数名与候选列表之外的取值被静默忽略（文件可能来自旧版
    /// 描述符）。
    pub fn apply_saved(&mut self, name: &str, mode: RunMode, saved: &SavedConfig) {
        let Some(entry) = self.entry_mut(name, mode) else {
            return;
        };
        for param in entry.params.iter_mut() {
            match &mut param.kind {
                ParamKind::Options { options, current } => {
                    if let Some(value) = saved.options.get(&param.name)
                        && options.contains(value)
                    {
                        *current = value.clone();
                    }
                }
                ParamKind::Bound { button } => {
                    if let Some(saved_button) = saved.bindings.get(&param.name) {
                        *button = *saved_button;
                    }
                }
            }
        }
    }

    /// 从某模式条目构造持久化数据
    pub fn to_saved(&self, name: &str, mode: RunMode) -> Option<SavedConfig> {
        let entry = self.entry(name, mode)?;
        let mut saved = SavedConfig::default();
        for param in &entry.params {
            match &param.kind {
                ParamKind::Options { current, .. } => {
                    saved.options.insert(param.name.clone(), current.clone());
                }
                ParamKind::Bound { button } => {
                    saved.bindings.insert(param.name.clone(), *button);
                }
            }
        }
        Some(saved)
    }

    /// 该子系统所有绑定输入设备的手动参数 → 绑定表
    pub fn bound_controls(&self, name: &str) -> Option<ControlBindings> {
        let entry = self.teleop.get(name)?;
        let mut bindings = ControlBindings::new();
        for param in &entry.params {
            if let ParamKind::Bound { button } = &param.kind {
                bindings.add_button(param.name.clone(), *button);
            }
        }
        Some(bindings)
    }

    /// 该子系统所有非设备参数的 名字 → 当前值 映射
    ///
    /// 自动与手动合并，键冲突时手动获胜。
    pub fn option_values(&self, name: &str) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for table in [&self.autonomous, &self.teleop] {
            if let Some(entry) = table.get(name) {
                for param in &entry.params {
                    if let ParamKind::Options { current, .. } = &param.kind {
                        values.insert(param.name.clone(), current.clone());
                    }
                }
            }
        }
        values
    }
}
