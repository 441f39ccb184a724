//! 光标：二维位置 + 闪烁相位
//!
//! 光标属于 MenuHost，激活菜单通过它判断高亮位置。闪烁相位按墙钟
//! 推进：距上次推进 ≥ 闪烁周期才走一步，0→1→2→3→0 循环，不跳相。

use std::time::{Duration, Instant};

use chassis_io::{Button, InputFrame};

/// 上/下导航按键对（边沿触发）
#[derive(Debug, Clone)]
struct CursorNav {
    up: Button,
    down: Button,
    up_armed: bool,
    down_armed: bool,
}

/// 菜单光标
///
/// # 示例
///
/// ```rust
/// use std::time::Duration;
/// use chassis_gui::Cursor;
///
/// let cursor = Cursor::new(Duration::from_millis(500));
/// assert_eq!(cursor.blink_phase(), 0);
/// assert_eq!((cursor.x(), cursor.y()), (0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    x: usize,
    y: usize,
    blink_period: Duration,
    blink_icon: char,
    blink_phase: u8,
    last_blink: Instant,
    active_menu: Option<String>,
    nav: Option<CursorNav>,
}

impl Cursor {
    /// 创建光标（位置 (0,0)，相位 0，墙钟从现在起算）
    pub fn new(blink_period: Duration) -> Self {
        Self {
            x: 0,
            y: 0,
            blink_period,
            blink_icon: '█',
            blink_phase: 0,
            last_blink: Instant::now(),
            active_menu: None,
            nav: None,
        }
    }

    /// 指定闪烁图标（链式）
    pub fn with_icon(mut self, icon: char) -> Self {
        self.blink_icon = icon;
        self
    }

    /// 绑定上/下导航按键（链式）
    ///
    /// 不绑定时光标只能由菜单代码移动。
    pub fn with_nav(mut self, up: Button, down: Button) -> Self {
        self.nav = Some(CursorNav {
            up,
            down,
            up_armed: true,
            down_armed: true,
        });
        self
    }

    /// 列坐标
    pub fn x(&self) -> usize {
        self.x
    }

    /// 行坐标
    pub fn y(&self) -> usize {
        self.y
    }

    /// 设置列坐标
    pub fn set_x(&mut self, x: usize) {
        self.x = x;
    }

    /// 设置行坐标
    pub fn set_y(&mut self, y: usize) {
        self.y = y;
    }

    /// 当前闪烁相位 ∈ {0,1,2,3}
    pub fn blink_phase(&self) -> u8 {
        self.blink_phase
    }

    /// 闪烁图标
    pub fn blink_icon(&self) -> char {
        self.blink_icon
    }

    /// 当前指向的激活菜单名
    pub fn active_menu(&self) -> Option<&str> {
        self.active_menu.as_deref()
    }

    /// 重新指向激活菜单（菜单切换时由 MenuHost 调用）
    ///
    /// 位置归零，闪烁状态保留。
    pub fn point_at(&mut self, menu_name: &str) {
        self.active_menu = Some(menu_name.to_string());
        self.x = 0;
        self.y = 0;
    }

    /// 每个重绘周期更新一次：推进闪烁相位、处理导航输入
    ///
    /// `row_bound` 为激活菜单的可选行数；y 被约束在 `[0, row_bound)`，
    /// `row_bound == 0` 时 y 固定为 0。
    pub fn update(&mut self, frame: &InputFrame, row_bound: usize) {
        self.advance_blink(Instant::now());

        if row_bound == 0 {
            self.y = 0;
        } else if self.y >= row_bound {
            self.y = row_bound - 1;
        }

        let Some(nav) = self.nav.as_mut() else {
            return;
        };

        let up = frame.bool_value(&nav.up).unwrap_or(false);
        let down = frame.bool_value(&nav.down).unwrap_or(false);

        if up && nav.up_armed {
            nav.up_armed = false;
            self.y = self.y.saturating_sub(1);
        } else if !up {
            nav.up_armed = true;
        }

        if down && nav.down_armed {
            nav.down_armed = false;
            if self.y + 1 < row_bound {
                self.y += 1;
            }
        } else if !down {
            nav.down_armed = true;
        }
    }

    /// 距上次推进 ≥ 闪烁周期时把相位走一步（模 4）
    ///
    /// 测试直接注入 `now` 以获得确定性时序。
    pub fn advance_blink(&mut self, now: Instant) {
        if now.duration_since(self.last_blink) >= self.blink_period {
            self.blink_phase = (self.blink_phase + 1) % 4;
            self.last_blink = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chassis_io::{BooleanInput, GamepadId, GamepadState, InputHub};

    #[test]
    fn test_blink_phase_advances_only_after_period() {
        let mut cursor = Cursor::new(Duration::from_millis(100));
        let start = Instant::now();

        // 周期未满：相位不动
        cursor.advance_blink(start + Duration::from_millis(50));
        assert_eq!(cursor.blink_phase(), 0);

        cursor.advance_blink(start + Duration::from_millis(100));
        assert_eq!(cursor.blink_phase(), 1);
    }

    #[test]
    fn test_blink_phase_cycles_in_order() {
        let mut cursor = Cursor::new(Duration::from_millis(10));
        let mut now = Instant::now();

        // 严格按 0→1→2→3→0 循环，不跳相
        for expected in [1u8, 2, 3, 0, 1] {
            now += Duration::from_millis(10);
            cursor.advance_blink(now);
            assert_eq!(cursor.blink_phase(), expected);
        }
    }

    #[test]
    fn test_long_gap_advances_one_phase() {
        let mut cursor = Cursor::new(Duration::from_millis(10));
        let now = Instant::now();

        // 即使错过多个周期，一次 update 也只走一步
        cursor.advance_blink(now + Duration::from_secs(1));
        assert_eq!(cursor.blink_phase(), 1);
    }

    #[test]
    fn test_nav_is_edge_triggered() {
        let hub = InputHub::new();
        let down = Button::boolean(GamepadId::Primary, BooleanInput::DpadDown);
        let up = Button::boolean(GamepadId::Primary, BooleanInput::DpadUp);
        let mut cursor = Cursor::new(Duration::from_secs(1)).with_nav(up, down);

        hub.publish(
            GamepadId::Primary,
            GamepadState {
                dpad_down: true,
                ..Default::default()
            },
        );
        let held = hub.frame();

        // 按住三个周期只移动一行
        cursor.update(&held, 5);
        cursor.update(&held, 5);
        cursor.update(&held, 5);
        assert_eq!(cursor.y(), 1);

        // 松开重新武装，再按下移动到第 2 行
        hub.publish(GamepadId::Primary, GamepadState::default());
        cursor.update(&hub.frame(), 5);
        hub.publish(
            GamepadId::Primary,
            GamepadState {
                dpad_down: true,
                ..Default::default()
            },
        );
        cursor.update(&hub.frame(), 5);
        assert_eq!(cursor.y(), 2);
    }

    #[test]
    fn test_y_clamped_to_row_bound() {
        let hub = InputHub::new();
        let mut cursor = Cursor::new(Duration::from_secs(1));
        cursor.set_y(10);

        cursor.update(&hub.frame(), 3);
        assert_eq!(cursor.y(), 2);

        cursor.update(&hub.frame(), 0);
        assert_eq!(cursor.y(), 0);
    }

    #[test]
    fn test_point_at_resets_position() {
        let mut cursor = Cursor::new(Duration::from_secs(1));
        cursor.set_x(3);
        cursor.set_y(4);

        cursor.point_at("config");
        assert_eq!(cursor.active_menu(), Some("config"));
        assert_eq!((cursor.x(), cursor.y()), (0, 0));
    }
}
