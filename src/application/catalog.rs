//! 시작 단계에서 내장 명령을 순서대로 등록하는 레지스트리 빌더.

use crate::application::handlers;
use crate::domain::{Mode, Registry, RegistryError};

/// 모든 내장 명령을 등록한 레지스트리를 만든다.
/// 중복 등록은 초기화 실패로 이어진다.
pub fn build_default_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();

    registry.add(
        "configure",
        Mode::Normal,
        "Enter privileged configuration mode",
        handlers::enter_privileged,
    )?;
    registry.add(
        "enable",
        Mode::Normal,
        "Enter privileged mode",
        handlers::enter_privileged,
    )?;
    registry.add("exit", Mode::Normal, "Exit the CLI", handlers::exit)?;
    registry.add(
        "exit",
        Mode::Privileged,
        "Exit configuration mode",
        handlers::exit,
    )?;
    registry.add(
        "end",
        Mode::Privileged,
        "Return to user mode",
        handlers::leave_privileged,
    )?;

    for mode in Mode::ALL {
        registry.add("?", mode, "Show available commands", handlers::list_commands)?;
        registry.add("help", mode, "Show available commands", handlers::list_commands)?;
        registry.add(
            "show commands",
            mode,
            "List commands for the current mode",
            handlers::list_commands,
        )?;
        registry.add(
            "show version",
            mode,
            "Show program version",
            handlers::show_version,
        )?;
    }

    registry.add(
        "show status",
        Mode::Privileged,
        "Show system information",
        handlers::show_status,
    )?;

    Ok(registry)
}
