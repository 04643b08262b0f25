//! 내장 명령 핸들러.
//! 세션 모드를 바꾸거나 리포터로 출력만 하며, 외부 부작용은 없다.

use anyhow::Result;

use crate::application::session::Session;
use crate::domain::{Mode, STATUS_OK, STATUS_TERMINATE};

const LISTING_NAME_WIDTH: usize = 30;

/// 일반 모드에서 특권 모드로 진입한다.
pub fn enter_privileged(session: &mut Session<'_>) -> Result<i32> {
    tracing::info!("entering privileged configuration mode");
    session.set_mode(Mode::Privileged);
    Ok(STATUS_OK)
}

/// 특권 모드를 벗어나 일반 모드로 돌아간다.
pub fn leave_privileged(session: &mut Session<'_>) -> Result<i32> {
    session.set_mode(Mode::Normal);
    Ok(STATUS_OK)
}

/// 특권 모드면 일반 모드로, 이미 일반 모드면 쉘 종료를 요청한다.
pub fn exit(session: &mut Session<'_>) -> Result<i32> {
    match session.mode() {
        Mode::Privileged => {
            tracing::info!("exiting configuration mode, returning to user mode");
            session.set_mode(Mode::Normal);
            Ok(STATUS_OK)
        }
        Mode::Normal => {
            tracing::info!("exiting CLI from user mode");
            Ok(STATUS_TERMINATE)
        }
    }
}

/// 현재 모드에서 쓸 수 있는 명령을 정렬해 출력한다.
pub fn list_commands(session: &mut Session<'_>) -> Result<i32> {
    let mode = session.mode();
    let reporter = session.reporter();
    let commands = session.registry().list(mode);

    if commands.is_empty() {
        tracing::warn!("no commands available in {mode} mode");
        reporter.raw("No commands available in this mode.");
        return Ok(STATUS_OK);
    }

    reporter.raw(&format!("Available commands in {mode} mode:"));
    for command in &commands {
        reporter.raw(&listing_line(&command.name(), command.description()));
    }
    tracing::debug!("displayed {} commands for {mode} mode", commands.len());
    Ok(STATUS_OK)
}

pub fn show_version(session: &mut Session<'_>) -> Result<i32> {
    let reporter = session.reporter();
    reporter.kv("name", env!("CARGO_PKG_NAME"));
    reporter.kv("version", env!("CARGO_PKG_VERSION"));
    Ok(STATUS_OK)
}

pub fn show_status(session: &mut Session<'_>) -> Result<i32> {
    let reporter = session.reporter();
    reporter.raw("System status: OK");
    reporter.raw(&format!("Current mode: {}", session.mode()));
    Ok(STATUS_OK)
}

fn listing_line(name: &str, description: &str) -> String {
    let first_column = format!("  {name}");
    format!("{first_column:<LISTING_NAME_WIDTH$} {description}")
}
