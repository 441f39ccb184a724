//! 配置编辑菜单
//!
//! 实现 [`chassis_gui::Menu`] 的配置编辑器：每个配置参数占一行，光标
//! 停在某行时按选择键循环该参数的取值，最后一行固定为 `[Done]`，选中
//! 后把当前取值持久化并进入完成状态。Orchestrator 据 [`Menu::is_done`]
//! 关闭配置 GUI。

use std::path::PathBuf;

use chassis_gui::{Cursor, GuiLine, Menu};
use chassis_io::{Button, InputFrame};
use tracing::warn;

use crate::config::{RunMode, SharedConfig};
use crate::storage::{load_subsystem_options, save_subsystem_options};

/// 配置编辑的持久化目标
#[derive(Debug, Clone)]
pub enum ConfigTarget {
    /// 编辑两个模式的全部参数，分别存入 `<root>/teleop` 与
    /// `<root>/autonomous`
    Combined(PathBuf),
    /// 只编辑单个模式的参数，存入指定模式目录（独立配置模式）
    ModeDir(PathBuf, RunMode),
}

impl ConfigTarget {
    fn modes(&self) -> Vec<RunMode> {
        match self {
            ConfigTarget::Combined(_) => vec![RunMode::Teleop, RunMode::Autonomous],
            ConfigTarget::ModeDir(_, mode) => vec![*mode],
        }
    }

    fn dir_for(&self, mode: RunMode) -> PathBuf {
        match self {
            ConfigTarget::Combined(root) => root.join(mode.dir_name()),
            ConfigTarget::ModeDir(dir, _) => dir.clone(),
        }
    }
}

/// 一个可编辑行指向注册表中的一条参数
struct RowRef {
    subsystem: String,
    mode: RunMode,
    param_idx: usize,
}

/// 配置编辑菜单
pub struct ConfigMenu {
    registry: SharedConfig,
    target: ConfigTarget,
    select: Button,
    select_armed: bool,
    done: bool,
    rows: Vec<RowRef>,
}

impl ConfigMenu {
    /// 创建配置菜单
    ///
    /// `select` 应是布尔按键；模拟绑定永远读不出按下，菜单将无法编辑。
    pub fn new(registry: SharedConfig, target: ConfigTarget, select: Button) -> Self {
        Self {
            registry,
            target,
            select,
            // 启动时按键可能恰好被按住：先观察到一次松开才武装
            select_armed: false,
            done: false,
            rows: Vec::new(),
        }
    }

    fn rebuild_rows(&mut self) {
        let registry = self.registry.read();
        self.rows.clear();
        for name in registry.names().iter() {
            for mode in self.target.modes() {
                if let Some(entry) = registry.entry(name, mode) {
                    for param_idx in 0..entry.params.len() {
                        self.rows.push(RowRef {
                            subsystem: name.clone(),
                            mode,
                            param_idx,
                        });
                    }
                }
            }
        }
    }

    fn load_saved(&mut self) {
        let names: Vec<String> = self.registry.read().names().to_vec();
        for name in names {
            for mode in self.target.modes() {
                let dir = self.target.dir_for(mode);
                match load_subsystem_options(&dir, &name) {
                    Ok(Some(saved)) => {
                        self.registry.write().apply_saved(&name, mode, &saved);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(subsystem = %name, error = %err, "Ignoring unreadable option file");
                    }
                }
            }
        }
    }

    fn persist(&mut self) {
        let registry = self.registry.read();
        for name in registry.names().iter() {
            for mode in self.target.modes() {
                let Some(saved) = registry.to_saved(name, mode) else {
                    continue;
                };
                let dir = self.target.dir_for(mode);
                if let Err(err) = save_subsystem_options(&dir, name, &saved) {
                    warn!(subsystem = %name, error = %err, "Failed to persist config options");
                }
            }
        }
    }

    fn mode_tag(mode: RunMode) -> &'static str {
        match mode {
            RunMode::Teleop => "T",
            RunMode::Autonomous => "A",
        }
    }
}

impl Menu for ConfigMenu {
    fn init(&mut self, _cursor: &mut Cursor) {
        self.load_saved();
        self.rebuild_rows();
    }

    fn handle_input(&mut self, frame: &InputFrame, cursor: &Cursor) {
        let pressed = frame.bool_value(&self.select).unwrap_or(false);
        if pressed && self.select_armed {
            self.select_armed = false;
            if let Some(row) = self.rows.get(cursor.y()) {
                self.registry
                    .write()
                    .cycle_param(&row.subsystem, row.mode, row.param_idx);
            } else if cursor.y() == self.rows.len() {
                self.persist();
                self.done = true;
            }
        } else if !pressed {
            self.select_armed = true;
        }
    }

    fn render(&self, _cursor: &Cursor) -> Vec<GuiLine> {
        let registry = self.registry.read();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        for row in &self.rows {
            let Some(entry) = registry.entry(&row.subsystem, row.mode) else {
                continue;
            };
            let Some(param) = entry.params.get(row.param_idx) else {
                continue;
            };
            let text = match &self.target {
                ConfigTarget::Combined(_) => format!(
                    "[{}] {} {}: {}",
                    Self::mode_tag(row.mode),
                    row.subsystem,
                    param.name,
                    param.display_value()
                ),
                ConfigTarget::ModeDir(..) => format!(
                    "{} {}: {}",
                    row.subsystem,
                    param.name,
                    param.display_value()
                ),
            };
            lines.push(GuiLine::new(text, ""));
        }
        lines.push(GuiLine::new("[Done]", ""));
        lines
    }

    fn selectable_rows(&self) -> usize {
        self.rows.len() + 1
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use chassis_io::{BooleanInput, GamepadId, GamepadState, InputHub};
    use parking_lot::RwLock;

    use crate::config::{ConfigParam, ConfigRegistry};
    use crate::storage::ensure_config_tree;
    use crate::subsystem::ConfigDescriptor;

    fn registry() -> SharedConfig {
        let mut registry = ConfigRegistry::new();
        registry
            .register(
                "lift",
                ConfigDescriptor::new("LiftSubsystem")
                    .with_teleop(vec![ConfigParam::options("Speed", ["slow", "fast"], "slow")])
                    .with_autonomous(vec![ConfigParam::options("Side", ["left", "right"], "left")]),
            )
            .unwrap();
        Arc::new(RwLock::new(registry))
    }

    fn select_button() -> Button {
        Button::boolean(GamepadId::Primary, BooleanInput::A)
    }

    fn frame(hub: &InputHub, a: bool) -> chassis_io::InputFrame {
        hub.publish(
            GamepadId::Primary,
            GamepadState {
                a,
                ..Default::default()
            },
        );
        hub.frame()
    }

    #[test]
    fn test_combined_rows_cover_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = ConfigMenu::new(
            registry(),
            ConfigTarget::Combined(dir.path().to_path_buf()),
            select_button(),
        );
        menu.init(&mut Cursor::new(Duration::from_millis(500)));

        // 两条参数行 + [Done]
        assert_eq!(menu.selectable_rows(), 3);
        let lines = menu.render(&Cursor::new(Duration::from_millis(500)));
        assert_eq!(lines[0].selection, "[T] lift Speed: slow");
        assert_eq!(lines[1].selection, "[A] lift Side: left");
        assert_eq!(lines[2].selection, "[Done]");
    }

    #[test]
    fn test_select_cycles_param_edge_triggered() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry();
        let mut menu = ConfigMenu::new(
            registry.clone(),
            ConfigTarget::Combined(dir.path().to_path_buf()),
            select_button(),
        );
        let mut cursor = Cursor::new(Duration::from_millis(500));
        menu.init(&mut cursor);

        let hub = InputHub::new();
        // 武装前的按下被吞掉
        menu.handle_input(&frame(&hub, true), &cursor);
        assert_eq!(registry.read().option_values("lift").get("Speed").unwrap(), "slow");

        // 松开武装，再按住多个周期只循环一次
        menu.handle_input(&frame(&hub, false), &cursor);
        let held = frame(&hub, true);
        menu.handle_input(&held, &cursor);
        menu.handle_input(&held, &cursor);
        assert_eq!(registry.read().option_values("lift").get("Speed").unwrap(), "fast");
    }

    #[test]
    fn test_done_row_persists_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        ensure_config_tree(dir.path()).unwrap();
        let registry = registry();
        let mut menu = ConfigMenu::new(
            registry.clone(),
            ConfigTarget::Combined(dir.path().to_path_buf()),
            select_button(),
        );
        let mut cursor = Cursor::new(Duration::from_millis(500));
        menu.init(&mut cursor);

        cursor.set_y(2); // [Done] 行
        let hub = InputHub::new();
        menu.handle_input(&frame(&hub, false), &cursor);
        menu.handle_input(&frame(&hub, true), &cursor);

        assert!(menu.is_done());
        let saved = load_subsystem_options(&dir.path().join("teleop"), "lift")
            .unwrap()
            .unwrap();
        assert_eq!(saved.options.get("Speed").unwrap(), "slow");
        let saved = load_subsystem_options(&dir.path().join("autonomous"), "lift")
            .unwrap()
            .unwrap();
        assert_eq!(saved.options.get("Side").unwrap(), "left");
    }

    #[test]
    fn test_init_applies_persisted_values() {
        let dir = tempfile::tempdir().unwrap();
        ensure_config_tree(dir.path()).unwrap();

        let mut saved = crate::storage::SavedConfig::default();
        saved.options.insert("Speed".to_string(), "fast".to_string());
        save_subsystem_options(&dir.path().join("teleop"), "lift", &saved).unwrap();

        let registry = registry();
        let mut menu = ConfigMenu::new(
            registry.clone(),
            ConfigTarget::Combined(dir.path().to_path_buf()),
            select_button(),
        );
        menu.init(&mut Cursor::new(Duration::from_millis(500)));

        assert_eq!(registry.read().option_values("lift").get("Speed").unwrap(), "fast");
    }

    #[test]
    fn test_mode_dir_limits_rows_and_storage() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry();
        let mut menu = ConfigMenu::new(
            registry.clone(),
            ConfigTarget::ModeDir(dir.path().to_path_buf(), RunMode::Autonomous),
            select_button(),
        );
        let mut cursor = Cursor::new(Duration::from_millis(500));
        menu.init(&mut cursor);

        // 只有自动模式的一条参数行 + [Done]
        assert_eq!(menu.selectable_rows(), 2);

        cursor.set_y(1);
        let hub = InputHub::new();
        menu.handle_input(&frame(&hub, false), &cursor);
        menu.handle_input(&frame(&hub, true), &cursor);

        assert!(menu.is_done());
        // 取值直接写入模式目录本身
        assert!(dir.path().join("lift.toml").is_file());
    }
}
