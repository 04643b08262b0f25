//! 기본 명령 레지스트리로 대화형 쉘 세션을 실행하는 유스케이스.

use anyhow::{Context, Result};

use crate::application::catalog::build_default_registry;
use crate::application::ports::{LineSource, Reporter};
use crate::application::session::{DEFAULT_HOSTNAME, Session};

/// 세션 표시 옵션.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub hostname: String,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
        }
    }
}

/// 레지스트리를 먼저 완성한 뒤 세션 루프를 시작한다.
pub struct RunShellUseCase<'a> {
    pub reporter: &'a dyn Reporter,
}

impl<'a> RunShellUseCase<'a> {
    /// 루프 종료 코드를 돌려준다. 레지스트리 구성 실패는 시작 오류다.
    pub fn execute(&self, input: &mut dyn LineSource, options: &ShellOptions) -> Result<i32> {
        let registry = build_default_registry().context("failed to build command registry")?;
        tracing::debug!("command registry ready ({} commands)", registry.len());

        let mut session =
            Session::new(&registry, self.reporter).with_hostname(options.hostname.clone());
        session.run(input)
    }
}
