//! 配置持久化存储
//!
//! 磁盘布局（以机器人名 `demo` 为例）：
//!
//! ```text
//! <base>/robot_demo/
//! ├── robot_info.txt          清单：配置子系统的类型名，按行
//! ├── autonomous/
//! │   ├── robot_info.txt      清单副本
//! │   └── <subsystem>.toml    自动阶段取值
//! └── teleop/
//!     ├── robot_info.txt      清单副本
//!     └── <subsystem>.toml    手动阶段取值
//! ```
//!
//! 清单写到三个位置，让只看到某个模式子目录的外部配置调试器也能
//! 读到完整的子系统清单。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chassis_io::Button;
use serde::{Deserialize, Serialize};

use crate::config::RunMode;
use crate::error::RobotError;

/// 清单文件名
pub const MANIFEST_FILE: &str = "robot_info.txt";

/// 单个子系统在单个模式下的持久化取值
///
/// TOML 文件的顶层结构。两张表都可缺省（旧文件或只含一类参数）。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SavedConfig {
    /// 选项参数：参数名 → 当前值
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// 设备绑定参数：参数名 → 按键
    #[serde(default)]
    pub bindings: BTreeMap<String, Button>,
}

/// 机器人的配置根目录：`<base>/robot_<name>`
pub fn config_root(base: &Path, robot_name: &str) -> PathBuf {
    base.join(format!("robot_{robot_name}"))
}

/// 确保配置目录树存在（幂等）
pub fn ensure_config_tree(root: &Path) -> Result<(), RobotError> {
    fs::create_dir_all(root.join(RunMode::Teleop.dir_name()))?;
    fs::create_dir_all(root.join(RunMode::Autonomous.dir_name()))?;
    Ok(())
}

/// 清单文件内容：换行分隔的类型名，无尾随换行
fn manifest_body(type_names: &[String]) -> String {
    type_names.join("\n")
}

/// 把清单写入根目录与两个模式子目录
pub fn write_manifests(root: &Path, type_names: &[String]) -> Result<(), RobotError> {
    let body = manifest_body(type_names);
    fs::write(root.join(MANIFEST_FILE), &body)?;
    for mode in [RunMode::Teleop, RunMode::Autonomous] {
        fs::write(root.join(mode.dir_name()).join(MANIFEST_FILE), &body)?;
    }
    Ok(())
}

/// 读取清单
pub fn read_manifest(dir: &Path) -> Result<Vec<String>, RobotError> {
    let body = fs::read_to_string(dir.join(MANIFEST_FILE))?;
    Ok(body
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn option_file(dir: &Path, subsystem: &str) -> PathBuf {
    dir.join(format!("{subsystem}.toml"))
}

/// 保存一个子系统在某个模式目录下的取值
pub fn save_subsystem_options(
    mode_dir: &Path,
    subsystem: &str,
    saved: &SavedConfig,
) -> Result<(), RobotError> {
    let path = option_file(mode_dir, subsystem);
    let body = toml::to_string_pretty(saved).map_err(|err| RobotError::MalformedOptionFile {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    fs::write(path, body)?;
    Ok(())
}

/// 读取一个子系统在某个模式目录下的取值
///
/// 文件不存在返回 `Ok(None)`（首次运行是正常情况）；存在但解析失败
/// 返回 [`RobotError::MalformedOptionFile`]。
pub fn load_subsystem_options(
    mode_dir: &Path,
    subsystem: &str,
) -> Result<Option<SavedConfig>, RobotError> {
    let path = option_file(mode_dir, subsystem);
    let body = match fs::read_to_string(&path) {
        Ok(body) => body,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let saved = toml::from_str(&body).map_err(|err| RobotError::MalformedOptionFile {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    Ok(Some(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chassis_io::{BooleanInput, GamepadId};

    #[test]
    fn test_config_root_naming() {
        let root = config_root(Path::new("/tmp/base"), "demo");
        assert_eq!(root, PathBuf::from("/tmp/base/robot_demo"));
    }

    #[test]
    fn test_ensure_tree_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = config_root(dir.path(), "demo");
        ensure_config_tree(&root).unwrap();
        ensure_config_tree(&root).unwrap();
        assert!(root.join("teleop").is_dir());
        assert!(root.join("autonomous").is_dir());
    }

    #[test]
    fn test_manifest_round_trip_no_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let root = config_root(dir.path(), "demo");
        ensure_config_tree(&root).unwrap();

        let names = vec!["LiftSubsystem".to_string(), "DriveSubsystem".to_string()];
        write_manifests(&root, &names).unwrap();

        let raw = fs::read_to_string(root.join(MANIFEST_FILE)).unwrap();
        assert_eq!(raw, "LiftSubsystem\nDriveSubsystem");

        // 三个位置都有同样的清单
        assert_eq!(read_manifest(&root).unwrap(), names);
        assert_eq!(read_manifest(&root.join("teleop")).unwrap(), names);
        assert_eq!(read_manifest(&root.join("autonomous")).unwrap(), names);
    }

    #[test]
    fn test_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let root = config_root(dir.path(), "demo");
        ensure_config_tree(&root).unwrap();
        write_manifests(&root, &[]).unwrap();
        assert!(read_manifest(&root).unwrap().is_empty());
    }

    #[test]
    fn test_options_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut saved = SavedConfig::default();
        saved.options.insert("Speed".to_string(), "fast".to_string());
        saved.bindings.insert(
            "Raise".to_string(),
            Button::boolean(GamepadId::Primary, BooleanInput::X),
        );

        save_subsystem_options(dir.path(), "lift", &saved).unwrap();
        let loaded = load_subsystem_options(dir.path(), "lift").unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_subsystem_options(dir.path(), "ghost").unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lift.toml"), "options = 42").unwrap();
        assert!(matches!(
            load_subsystem_options(dir.path(), "lift"),
            Err(RobotError::MalformedOptionFile { .. })
        ));
    }
}
