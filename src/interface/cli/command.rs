//! CLI 인자 파싱 모듈.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::usecases::run_shell::ShellOptions;
use crate::infrastructure::config::{Config, LOG_LEVELS};
use crate::infrastructure::logging::LogSettings;

#[derive(Debug, Parser)]
#[command(name = "auld", version)]
#[command(about = "Cisco-style modal command shell with unambiguous abbreviations")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Logging level (default: config value, else warn)
    #[arg(long, value_parser = LOG_LEVELS)]
    log_level: Option<String>,

    /// Write logs to this file as well
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable console (stderr) logging
    #[arg(long)]
    no_console_log: bool,

    /// Name shown before the prompt marker
    #[arg(long)]
    hostname: Option<String>,

    /// Do not print the welcome banner
    #[arg(long)]
    no_banner: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and searched paths
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliAction {
    Interactive,
    InspectConfig,
}

/// 설정 파일 값을 덮어쓰는 실행 인자.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub no_console_log: bool,
    pub hostname: Option<String>,
    pub no_banner: bool,
}

/// 설정과 인자를 합친 최종 실행 값.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub log: LogSettings,
    pub shell: ShellOptions,
    pub banner: bool,
}

impl Cli {
    pub fn parse_action() -> (CliAction, Overrides) {
        Cli::parse().into_action()
    }

    pub fn try_parse_action<I, T>(args: I) -> Result<(CliAction, Overrides), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Cli::try_parse_from(args)?.into_action())
    }

    fn into_action(self) -> (CliAction, Overrides) {
        let action = match self.command {
            Some(Commands::Config) => CliAction::InspectConfig,
            None => CliAction::Interactive,
        };

        let overrides = Overrides {
            log_level: self.log_level,
            log_file: self.log_file,
            no_console_log: self.no_console_log,
            hostname: self.hostname,
            no_banner: self.no_banner,
        };

        (action, overrides)
    }
}

impl Overrides {
    /// 인자 > 설정 파일 > 기본값 순으로 실행 값을 결정한다.
    pub fn resolve(&self, config: &Config) -> LaunchSettings {
        LaunchSettings {
            log: LogSettings {
                level: self.log_level.clone().unwrap_or_else(|| config.log_level()),
                file: self.log_file.clone().or_else(|| config.log_file()),
                console: !self.no_console_log && config.console_log_enabled(),
            },
            shell: ShellOptions {
                hostname: self
                    .hostname
                    .clone()
                    .filter(|h| !h.trim().is_empty())
                    .unwrap_or_else(|| config.hostname()),
            },
            banner: !self.no_banner && config.banner_enabled(),
        }
    }
}
