//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;

use crate::application::ports::ConfigRepository;
use crate::application::usecases::run_shell::RunShellUseCase;
use crate::infrastructure::adapters::{ConsoleReporter, JsonConfigRepository};
use crate::infrastructure::config::Config;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            reporter: ConsoleReporter::new(),
        }
    }
}

impl AppComposition {
    /// 병합된 설정을 읽는다.
    pub fn load_config(&self) -> Result<Config> {
        self.config_repo.load()
    }

    /// 설정 점검 결과 JSON을 만든다.
    pub fn inspect_config(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }

    /// 쉘 실행 유스케이스를 생성한다.
    pub fn run_shell_usecase(&self) -> RunShellUseCase<'_> {
        RunShellUseCase {
            reporter: &self.reporter,
        }
    }
}
