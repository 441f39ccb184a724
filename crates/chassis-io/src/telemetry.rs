//! 文本输出表面
//!
//! 宿主环境提供一块按行刷新的文本显示区（驾驶站屏幕）。`TelemetrySink`
//! 抽象这块表面；`Telemetry` 是可克隆的共享句柄，MenuHost 和错误上报
//! 路径写同一块表面。
//!
//! # 刷新模型
//!
//! `add_line` 只是累积待显示行，`flush` 才把累积内容作为一帧提交并
//! 清空缓冲。`clear` 丢弃未提交的行。

use std::fmt::Display;
use std::sync::Arc;

use parking_lot::Mutex;

/// 文本输出表面
pub trait TelemetrySink: Send {
    /// 追加一行待显示文本
    fn add_line(&mut self, line: &str);

    /// 丢弃未提交的行
    fn clear(&mut self);

    /// 把累积的行提交为一帧
    fn flush(&mut self);
}

/// 允许把 `Arc<Mutex<S>>` 直接当 sink 用
///
/// 测试和宿主代码保留自己的句柄以便事后检查输出。
impl<S: TelemetrySink> TelemetrySink for Arc<Mutex<S>> {
    fn add_line(&mut self, line: &str) {
        self.lock().add_line(line);
    }

    fn clear(&mut self) {
        self.lock().clear();
    }

    fn flush(&mut self) {
        self.lock().flush();
    }
}

/// 共享输出句柄
///
/// MenuHost、Orchestrator 和子系统各持有一个克隆，写入同一块表面。
///
/// # 示例
///
/// ```rust
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use chassis_io::{MemorySink, Telemetry};
///
/// let sink = Arc::new(Mutex::new(MemorySink::new()));
/// let telemetry = Telemetry::new(sink.clone());
///
/// telemetry.add_data("Lift", 42);
/// telemetry.flush();
/// assert_eq!(sink.lock().flush_count(), 1);
/// ```
#[derive(Clone)]
pub struct Telemetry {
    sink: Arc<Mutex<Box<dyn TelemetrySink>>>,
}

impl Telemetry {
    /// 包装一个输出表面
    pub fn new(sink: impl TelemetrySink + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// 追加一行
    pub fn add_line(&self, line: &str) {
        self.sink.lock().add_line(line);
    }

    /// 追加 "标题: 值" 格式的一行
    pub fn add_data(&self, caption: &str, value: impl Display) {
        self.sink.lock().add_line(&format!("{caption}: {value}"));
    }

    /// 丢弃未提交的行
    pub fn clear(&self) {
        self.sink.lock().clear();
    }

    /// 提交一帧
    pub fn flush(&self) {
        self.sink.lock().flush();
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry").finish_non_exhaustive()
    }
}

/// 内存输出表面（测试 / 演示用）
///
/// 记录每次 `flush` 提交的帧和总提交次数。
#[derive(Debug, Default)]
pub struct MemorySink {
    pending: Vec<String>,
    frames: Vec<Vec<String>>,
    flush_count: usize,
}

impl MemorySink {
    /// 创建空表面
    pub fn new() -> Self {
        Self::default()
    }

    /// 已提交的帧数
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// 最近一次提交的帧
    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(|f| f.as_slice())
    }

    /// 所有已提交的帧
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    /// 未提交的行
    pub fn pending(&self) -> &[String] {
        &self.pending
    }
}

impl TelemetrySink for MemorySink {
    fn add_line(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    fn clear(&mut self) {
        self.pending.clear();
    }

    fn flush(&mut self) {
        self.frames.push(std::mem::take(&mut self.pending));
        self.flush_count += 1;
    }
}
