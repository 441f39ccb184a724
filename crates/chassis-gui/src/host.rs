//! MenuHost：单激活菜单的呈现管理器
//!
//! 持有命名菜单集合（注册顺序保存在平行的 key 列表里，循环切换顺序
//! 因此是确定的）、一个循环切换按键、一个光标。每个控制周期由
//! Orchestrator 调用一次 [`draw_current_menu`](MenuHost::draw_current_menu)。

use std::collections::HashMap;
use std::sync::Arc;

use chassis_io::{Button, ControlBindings, InputHub, Telemetry};
use tracing::warn;

use crate::cursor::Cursor;
use crate::error::GuiError;
use crate::line::GuiLine;
use crate::menu::Menu;

const CYCLE_MENUS: &str = "CycleMenus";

/// 菜单宿主
///
/// # 循环切换
///
/// 切换按键是边沿触发的一次性触发器：按下且武装标志有效时前进一个
/// 菜单（模菜单数）并解除武装；只有观察到按键松开才重新武装。武装
/// 标志初始为未武装，第一次观察到松开后才生效，避免启动时按键恰好
/// 被按住造成切换。
pub struct MenuHost {
    menus: HashMap<String, Box<dyn Menu>>,
    keys: Vec<String>,
    active_idx: usize,
    active_name: Option<String>,
    cursor: Cursor,
    bindings: ControlBindings,
    ready: bool,
    telemetry: Telemetry,
    input: Arc<InputHub>,
}

impl MenuHost {
    /// 创建菜单宿主
    ///
    /// # 错误
    ///
    /// 循环切换按键必须是布尔控件，否则返回
    /// [`GuiError::NotBooleanInput`]（快速失败，宿主不会被构造出来）。
    pub fn new(
        telemetry: Telemetry,
        input: Arc<InputHub>,
        cursor: Cursor,
        cycle_button: Button,
    ) -> Result<Self, GuiError> {
        if !cycle_button.is_boolean() {
            return Err(GuiError::NotBooleanInput);
        }

        let mut bindings = ControlBindings::new();
        bindings.add_button(CYCLE_MENUS, cycle_button);

        Ok(Self {
            menus: HashMap::new(),
            keys: Vec::new(),
            active_idx: 0,
            active_name: None,
            cursor,
            bindings,
            ready: false,
            telemetry,
            input,
        })
    }

    /// 注册菜单（同名覆盖，保留原循环位置）
    pub fn add_menu(&mut self, name: impl Into<String>, menu: Box<dyn Menu>) {
        let name = name.into();
        if !self.keys.contains(&name) {
            self.keys.push(name.clone());
        }
        self.menus.insert(name, menu);
    }

    /// 移除菜单并修正激活指针
    ///
    /// 被移除的菜单在激活菜单之前时，激活下标前移一位；随后对新的
    /// 菜单数取模，若该下标上的菜单发生了变化则重新激活它（其 `open`
    /// 恰好触发一次）。
    ///
    /// # 错误
    ///
    /// - [`GuiError::UnknownMenu`]：名字未注册
    /// - [`GuiError::NoMenusRegistered`]：移除的是最后一个菜单
    ///   （前置条件违反：激活期间必须至少保留一个菜单）
    pub fn remove_menu(&mut self, name: &str) -> Result<(), GuiError> {
        let idx = self
            .keys
            .iter()
            .position(|k| k == name)
            .ok_or_else(|| GuiError::UnknownMenu {
                name: name.to_string(),
            })?;

        self.keys.remove(idx);
        self.menus.remove(name);

        if self.keys.is_empty() {
            self.active_name = None;
            return Err(GuiError::NoMenusRegistered);
        }

        if idx < self.active_idx {
            self.active_idx -= 1;
        }
        self.active_idx %= self.keys.len();

        let occupant = self.keys[self.active_idx].clone();
        if self.active_name.as_deref() != Some(occupant.as_str()) {
            self.set_active_menu(&occupant)?;
        }
        Ok(())
    }

    /// 已注册的菜单数
    pub fn menu_count(&self) -> usize {
        self.keys.len()
    }

    /// 按名字查菜单
    pub fn menu(&self, name: &str) -> Option<&dyn Menu> {
        self.menus.get(name).map(|m| m.as_ref())
    }

    /// 按名字查菜单（可变）
    pub fn menu_mut(&mut self, name: &str) -> Option<&mut Box<dyn Menu>> {
        self.menus.get_mut(name)
    }

    /// 当前激活菜单名
    pub fn active_menu_name(&self) -> Option<&str> {
        self.active_name.as_deref()
    }

    /// 光标（只读）
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// 启动：运行每个菜单的 `init`
    ///
    /// 若此前没有激活菜单，第一个注册的菜单成为激活菜单。
    pub fn start(&mut self) {
        for key in self.keys.clone() {
            if let Some(menu) = self.menus.get_mut(&key) {
                menu.init(&mut self.cursor);
            }
        }

        if self.active_name.is_none()
            && let Some(first) = self.keys.first().cloned()
        {
            // set_active_menu 只会因未知名字失败，first 必然存在
            let _ = self.set_active_menu(&first);
        }
    }

    /// 停止：运行每个菜单的 `stop`，然后清屏
    pub fn stop(&mut self) {
        for menu in self.menus.values_mut() {
            menu.stop();
        }
        self.telemetry.clear();
        self.telemetry.flush();
    }

    /// 绕过循环按键直接激活某个菜单
    ///
    /// 启动和 `remove_menu` 的修正路径使用。运行菜单的 `open` 钩子
    /// 并把光标重新指向它。
    pub fn set_active_menu(&mut self, name: &str) -> Result<(), GuiError> {
        let idx = self
            .keys
            .iter()
            .position(|k| k == name)
            .ok_or_else(|| GuiError::UnknownMenu {
                name: name.to_string(),
            })?;

        self.active_idx = idx;
        self.active_name = Some(name.to_string());
        if let Some(menu) = self.menus.get_mut(name) {
            menu.open();
        }
        self.cursor.point_at(name);
        Ok(())
    }

    /// 一次重绘周期
    ///
    /// 顺序：更新光标 → 边沿检测循环按键 → 激活菜单处理输入 →
    /// 渲染 → 光标行闪烁覆盖 → 刷新输出表面。
    ///
    /// # 错误
    ///
    /// 没有任何菜单注册时返回 [`GuiError::NoMenusRegistered`]。
    pub fn draw_current_menu(&mut self) -> Result<(), GuiError> {
        if self.keys.is_empty() {
            return Err(GuiError::NoMenusRegistered);
        }
        if self.active_name.is_none() {
            let first = self.keys[0].clone();
            self.set_active_menu(&first)?;
        }

        let frame = self.input.frame();

        let active = self.active_name.clone().unwrap_or_default();
        let rows = self.menus.get(&active).map(|m| m.selectable_rows()).unwrap_or(0);
        self.cursor.update(&frame, rows);

        // 边沿触发：一次按下只切换一个菜单
        let pressed = self.bindings.read_bool(CYCLE_MENUS, &frame).unwrap_or(false);
        if pressed && self.ready {
            self.ready = false;
            self.active_idx = (self.active_idx + 1) % self.keys.len();
            let next = self.keys[self.active_idx].clone();
            self.set_active_menu(&next)?;
        } else if !pressed && !self.ready {
            self.ready = true;
        }

        let active = self.active_name.clone().unwrap_or_default();
        let lines = match self.menus.get_mut(&active) {
            Some(menu) => {
                menu.handle_input(&frame, &self.cursor);
                menu.render(&self.cursor)
            }
            None => {
                warn!(menu = %active, "Active menu missing from registry");
                Vec::new()
            }
        };

        for (row, line) in lines.iter().enumerate() {
            if row == self.cursor.y() && rows > 0 {
                let selection = blink_selection(line, &self.cursor);
                self.telemetry.add_line(&line.text_with_selection(&selection));
            } else {
                self.telemetry.add_line(&line.text());
            }
        }
        self.telemetry.flush();
        Ok(())
    }
}

/// 对光标所在行的选择区做闪烁覆盖
///
/// 相位 0 显示光标图标，相位 1/3 显示空格，相位 2 显示底下的字符。
fn blink_selection(line: &GuiLine, cursor: &Cursor) -> String {
    line.selection
        .chars()
        .enumerate()
        .map(|(col, ch)| {
            if col == cursor.x() {
                match cursor.blink_phase() {
                    0 => cursor.blink_icon(),
                    1 | 3 => ' ',
                    _ => ch,
                }
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chassis_io::{AnalogInput, BooleanInput, GamepadId, GamepadState, MemorySink};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingMenu {
        label: String,
        opens: Arc<AtomicUsize>,
    }

    impl CountingMenu {
        fn new(label: &str) -> (Self, Arc<AtomicUsize>) {
            let opens = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    label: label.to_string(),
                    opens: opens.clone(),
                },
                opens,
            )
        }
    }

    impl Menu for CountingMenu {
        fn open(&mut self) {
            self.opens.fetch_add(1, Ordering::Relaxed);
        }

        fn render(&self, _cursor: &Cursor) -> Vec<GuiLine> {
            vec![GuiLine::plain(self.label.clone())]
        }
    }

    fn host_with_menus(labels: &[&str]) -> (MenuHost, Arc<InputHub>, Arc<Mutex<MemorySink>>) {
        let sink = Arc::new(Mutex::new(MemorySink::new()));
        let hub = Arc::new(InputHub::new());
        let cycle = Button::boolean(GamepadId::Primary, BooleanInput::Back);
        let mut host = MenuHost::new(
            Telemetry::new(sink.clone()),
            hub.clone(),
            Cursor::new(Duration::from_millis(500)),
            cycle,
        )
        .unwrap();

        for label in labels {
            let (menu, _) = CountingMenu::new(label);
            host.add_menu(*label, Box::new(menu));
        }
        host.start();
        (host, hub, sink)
    }

    fn press(hub: &InputHub, host: &mut MenuHost) {
        hub.publish(
            GamepadId::Primary,
            GamepadState {
                back: true,
                ..Default::default()
            },
        );
        host.draw_current_menu().unwrap();
        hub.publish(GamepadId::Primary, GamepadState::default());
        host.draw_current_menu().unwrap();
    }

    #[test]
    fn test_non_boolean_cycle_button_fails_fast() {
        let sink = Telemetry::new(MemorySink::new());
        let hub = Arc::new(InputHub::new());
        let result = MenuHost::new(
            sink,
            hub,
            Cursor::new(Duration::from_millis(500)),
            Button::analog(GamepadId::Primary, AnalogInput::LeftTrigger),
        );
        assert!(matches!(result, Err(GuiError::NotBooleanInput)));
    }

    #[test]
    fn test_start_activates_first_menu() {
        let (host, _, _) = host_with_menus(&["A", "B"]);
        assert_eq!(host.active_menu_name(), Some("A"));
    }

    #[test]
    fn test_cycle_n_plus_one_presses_returns_to_start() {
        let (mut host, hub, _) = host_with_menus(&["A", "B", "C"]);

        // 武装标志初始未武装：第一次按下被吞掉，其后 N 次各切换一次
        for _ in 0..4 {
            press(&hub, &mut host);
        }
        assert_eq!(host.active_menu_name(), Some("A"));
    }

    #[test]
    fn test_held_button_switches_once() {
        let (mut host, hub, _) = host_with_menus(&["A", "B", "C"]);

        // 先松开一个周期武装标志
        host.draw_current_menu().unwrap();

        hub.publish(
            GamepadId::Primary,
            GamepadState {
                back: true,
                ..Default::default()
            },
        );
        for _ in 0..5 {
            host.draw_current_menu().unwrap();
        }
        assert_eq!(host.active_menu_name(), Some("B"));
    }

    #[test]
    fn test_remove_active_menu_reactivates_once() {
        let sink = Arc::new(Mutex::new(MemorySink::new()));
        let hub = Arc::new(InputHub::new());
        let mut host = MenuHost::new(
            Telemetry::new(sink),
            hub,
            Cursor::new(Duration::from_millis(500)),
            Button::boolean(GamepadId::Primary, BooleanInput::Back),
        )
        .unwrap();

        let (menu_a, opens_a) = CountingMenu::new("A");
        let (menu_b, _opens_b) = CountingMenu::new("B");
        let (menu_c, opens_c) = CountingMenu::new("C");
        host.add_menu("A", Box::new(menu_a));
        host.add_menu("B", Box::new(menu_b));
        host.add_menu("C", Box::new(menu_c));
        host.start();
        host.set_active_menu("B").unwrap();

        let before_a = opens_a.load(Ordering::Relaxed);
        let before_c = opens_c.load(Ordering::Relaxed);
        host.remove_menu("B").unwrap();

        // 新激活菜单是 A 或 C 之一，其 open 恰好触发一次
        let active = host.active_menu_name().unwrap().to_string();
        assert!(active == "A" || active == "C");
        let fired_a = opens_a.load(Ordering::Relaxed) - before_a;
        let fired_c = opens_c.load(Ordering::Relaxed) - before_c;
        assert_eq!(fired_a + fired_c, 1);
    }

    #[test]
    fn test_remove_menu_before_active_keeps_active() {
        let (mut host, _, _) = host_with_menus(&["A", "B", "C"]);
        host.set_active_menu("B").unwrap();

        host.remove_menu("A").unwrap();
        assert_eq!(host.active_menu_name(), Some("B"));
    }

    #[test]
    fn test_remove_last_menu_is_precondition_violation() {
        let (mut host, _, _) = host_with_menus(&["A"]);
        assert!(matches!(
            host.remove_menu("A"),
            Err(GuiError::NoMenusRegistered)
        ));
    }

    #[test]
    fn test_draw_flushes_rendered_lines() {
        let (mut host, _, sink) = host_with_menus(&["A"]);
        host.draw_current_menu().unwrap();

        let sink = sink.lock();
        assert_eq!(sink.flush_count(), 1);
        assert_eq!(sink.last_frame().unwrap(), &["A".to_string()]);
    }

    #[test]
    fn test_stop_clears_screen() {
        let (mut host, _, sink) = host_with_menus(&["A"]);
        host.draw_current_menu().unwrap();
        host.stop();

        let sink = sink.lock();
        // stop 产生一帧空白（清屏 + 刷新）
        assert_eq!(sink.last_frame().unwrap().len(), 0);
    }

    #[test]
    fn test_blink_selection_phases() {
        let line = GuiLine::new("abc", "");
        let mut cursor = Cursor::new(Duration::from_millis(10));
        cursor.set_x(1);

        // 相位 0：图标
        assert_eq!(blink_selection(&line, &cursor), format!("a{}c", cursor.blink_icon()));

        let mut now = std::time::Instant::now();
        // 相位 1：空格
        now += Duration::from_millis(10);
        cursor.advance_blink(now);
        assert_eq!(blink_selection(&line, &cursor), "a c");

        // 相位 2：原字符
        now += Duration::from_millis(10);
        cursor.advance_blink(now);
        assert_eq!(blink_selection(&line, &cursor), "abc");

        // 相位 3：空格
        now += Duration::from_millis(10);
        cursor.advance_blink(now);
        assert_eq!(blink_selection(&line, &cursor), "a c");
    }
}
