//! PID 控制器实现
//!
//! # 算法
//!
//! 每个控制周期：
//!
//! ```text
//! error = error_fn(setpoint, current)
//! P = kp · error                        (Standard / FeedForward)
//! P = clamp_p(P - kp · Δmeasurement)    (POnM，跨周期累积)
//! I = clamp_i(I + ki · error · dt)
//! D = -kd · Δmeasurement / dt           (dt ≤ 1e-4 时为 0)
//! F = kf · setpoint                     (仅 FeedForward)
//! output = clamp(P + I + D [+ F])
//! ```
//!
//! # 时间处理
//!
//! `correction` 内部用墙钟计算 `dt`（秒）；`init` 之后的第一次调用
//! `dt = 0`。测试通过模块内的 `step(current, dt)` 注入确定性时间。

use std::time::Instant;

/// 误差函数：`(setpoint, current) -> error`
///
/// 默认为减法；环形量（如航向角）可在构造时替换为带回绕的实现。
pub type ErrorFn = Box<dyn Fn(f64, f64) -> f64 + Send>;

/// 控制模式变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PidMode {
    /// 经典 PID
    #[default]
    Standard,
    /// PID + 设定值前馈
    FeedForward,
    /// Proportional on measurement（P 项为跨周期累积量）
    POnM,
}

/// 区间约束（默认无界）
#[derive(Debug, Clone, Copy)]
struct Clamp {
    lower: f64,
    upper: f64,
}

impl Clamp {
    const UNBOUNDED: Clamp = Clamp {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    fn clip(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// 多模式 PID 控制器
///
/// # 生命周期
///
/// - [`init`](PidController::init)：重置全部运行项与时间戳并激活
/// - [`enable`](PidController::enable) / [`disable`](PidController::disable)：
///   切换激活状态，保留调校参数
/// - [`correction`](PidController::correction)：每个控制周期调用一次
///
/// 所有 setter（clamp、调校、设定值）随时可调，下一次 `correction`
/// 生效。
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    kf: f64,
    mode: PidMode,
    error_fn: ErrorFn,

    p: f64,
    i: f64,
    d: f64,
    f: f64,

    setpoint: f64,
    last_state: f64,
    last_output: f64,

    i_clamp: Clamp,
    out_clamp: Clamp,
    p_clamp: Clamp,

    last_update: Option<Instant>,
    active: bool,
}

impl std::fmt::Debug for PidController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PidController")
            .field("mode", &self.mode)
            .field("kp", &self.kp)
            .field("ki", &self.ki)
            .field("kd", &self.kd)
            .field("kf", &self.kf)
            .field("setpoint", &self.setpoint)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl PidController {
    /// 创建 Standard 模式控制器（kf = 0，默认误差函数）
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            kf: 0.0,
            mode: PidMode::Standard,
            error_fn: Box::new(|setpoint, current| setpoint - current),
            p: 0.0,
            i: 0.0,
            d: 0.0,
            f: 0.0,
            setpoint: 0.0,
            last_state: 0.0,
            last_output: 0.0,
            i_clamp: Clamp::UNBOUNDED,
            out_clamp: Clamp::UNBOUNDED,
            p_clamp: Clamp::UNBOUNDED,
            last_update: None,
            active: false,
        }
    }

    /// 创建前馈模式控制器
    pub fn feed_forward(kp: f64, ki: f64, kd: f64, kf: f64) -> Self {
        let mut pid = Self::new(kp, ki, kd);
        pid.kf = kf;
        pid.mode = PidMode::FeedForward;
        pid
    }

    /// 指定控制模式（链式）
    pub fn with_mode(mut self, mode: PidMode) -> Self {
        self.mode = mode;
        self
    }

    /// 替换误差函数（链式，仅构造期）
    pub fn with_error_fn(mut self, error_fn: impl Fn(f64, f64) -> f64 + Send + 'static) -> Self {
        self.error_fn = Box::new(error_fn);
        self
    }

    /// 初始化控制系统
    ///
    /// 重置全部运行项为 0、时间戳为"从未更新"、所有 clamp 为无界，
    /// 并激活控制器。
    pub fn init(&mut self, setpoint: f64, initial_state: f64) {
        self.setpoint = setpoint;
        self.last_state = initial_state;
        self.last_update = None;
        self.i_clamp = Clamp::UNBOUNDED;
        self.out_clamp = Clamp::UNBOUNDED;
        self.p_clamp = Clamp::UNBOUNDED;
        self.p = 0.0;
        self.i = 0.0;
        self.d = 0.0;
        self.f = 0.0;
        self.active = true;
    }

    /// 重新启用控制器
    ///
    /// 只重置积分项和上次状态/时间戳，调校与 clamp 保持不变。
    pub fn enable(&mut self, current: f64) {
        self.i = 0.0;
        self.last_state = current;
        self.last_update = Some(Instant::now());
        self.active = true;
    }

    /// 停用控制器
    ///
    /// 冻结最后输出（经输出 clamp），之后 `correction` 恒返回 0。
    pub fn disable(&mut self) {
        self.last_output = self.out_clamp.clip(self.p + self.i + self.d);
        self.active = false;
    }

    /// 是否处于激活状态
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 停用时冻结的最后输出
    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    /// 设置积分项约束
    pub fn set_i_clamp(&mut self, lower: f64, upper: f64) {
        self.i_clamp = Clamp { lower, upper };
    }

    /// 设置总输出约束
    pub fn set_output_clamp(&mut self, lower: f64, upper: f64) {
        self.out_clamp = Clamp { lower, upper };
    }

    /// 设置 POnM 比例项约束
    pub fn set_p_on_m_clamp(&mut self, lower: f64, upper: f64) {
        self.p_clamp = Clamp { lower, upper };
    }

    /// 更新设定值
    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    /// 当前设定值
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// 更新调校系数
    pub fn set_tunings(&mut self, kp: f64, ki: f64, kd: f64) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
    }

    /// 计算当前误差
    pub fn error(&self, current: f64) -> f64 {
        (self.error_fn)(self.setpoint, current)
    }

    /// 计算本周期修正量
    ///
    /// 未激活时立即返回 0。`dt` 为距上次更新的秒数，`init` 后第一次
    /// 调用为 0。
    pub fn correction(&mut self, current: f64) -> f64 {
        if !self.active {
            return 0.0;
        }

        let dt = self
            .last_update
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        let output = self.step(current, dt);
        self.last_update = Some(Instant::now());
        output
    }

    /// 模式相关的控制数学（时间注入点）
    fn step(&mut self, current: f64, dt: f64) -> f64 {
        let error = self.error(current);
        let delta = current - self.last_state;

        self.i = self.i_clamp.clip(self.i + self.ki * error * dt);
        self.d = if dt <= 1e-4 { 0.0 } else { -self.kd * delta / dt };

        let raw = match self.mode {
            PidMode::Standard => {
                self.p = self.kp * error;
                self.p + self.i + self.d
            }
            PidMode::FeedForward => {
                self.p = self.kp * error;
                self.f = self.kf * self.setpoint;
                self.p + self.i + self.d + self.f
            }
            PidMode::POnM => {
                // P 项跨周期累积，抑制设定值跳变引起的冲击
                self.p = self.p_clamp.clip(self.p - self.kp * delta);
                self.p + self.i + self.d
            }
        };

        self.last_state = current;
        self.out_clamp.clip(raw)
    }
}
