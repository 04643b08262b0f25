//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::types::{LoggingConfig, ShellConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
    pub effective: EffectiveSettings,
}

/// 기본값까지 반영한 최종 적용 값.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub hostname: String,
    pub banner: bool,
    pub log_level: String,
    pub log_file: Option<String>,
    pub console_log: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            shell: config.shell.clone(),
            logging: config.logging.clone(),
            effective: EffectiveSettings {
                hostname: config.hostname(),
                banner: config.banner_enabled(),
                log_level: config.log_level(),
                log_file: config.log_file().map(|p| p.display().to_string()),
                console_log: config.console_log_enabled(),
            },
        }
    }
}
