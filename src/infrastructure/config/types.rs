//! 설정 스키마와 병합/해석 규칙.

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::application::session::DEFAULT_HOSTNAME;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// 설정 파일과 `--log-level`이 받아들이는 레벨.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 프롬프트/배너 등 쉘 표시 설정
    #[serde(default)]
    pub shell: ShellConfig,
    /// 로그 출력 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ShellConfig {
    /// 프롬프트 앞에 표시할 이름
    pub hostname: Option<String>,
    /// 시작 배너 출력 여부(기본 true)
    pub banner: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LoggingConfig {
    /// 로그 레벨(trace/debug/info/warn/error)
    pub level: Option<String>,
    /// 로그 파일 경로. 없으면 파일 로그를 남기지 않는다.
    pub file: Option<String>,
    /// stderr 로그 출력 여부(기본 true)
    pub console: Option<bool>,
}

impl Config {
    pub fn hostname(&self) -> String {
        self.shell
            .hostname
            .clone()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string())
    }

    pub fn banner_enabled(&self) -> bool {
        self.shell.banner.unwrap_or(true)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn console_log_enabled(&self) -> bool {
        self.logging.console.unwrap_or(true)
    }

    /// 파일 하나를 읽은 직후 값 범위를 확인한다.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(level) = &self.logging.level
            && !LOG_LEVELS.contains(&level.as_str())
        {
            bail!(
                "unknown logging.level {level:?} (expected one of: {})",
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.shell.merge_from(other.shell);
        self.logging.merge_from(other.logging);
    }
}

impl ShellConfig {
    fn merge_from(&mut self, other: ShellConfig) {
        if other.hostname.is_some() {
            self.hostname = other.hostname;
        }
        if other.banner.is_some() {
            self.banner = other.banner;
        }
    }
}

impl LoggingConfig {
    fn merge_from(&mut self, other: LoggingConfig) {
        if other.level.is_some() {
            self.level = other.level;
        }
        if other.file.is_some() {
            self.file = other.file;
        }
        if other.console.is_some() {
            self.console = other.console;
        }
    }
}
