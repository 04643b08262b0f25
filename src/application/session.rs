//! 모드 상태를 가진 대화형 쉘 세션과 read-eval 루프.

use anyhow::Result;

use crate::application::ports::{LineEvent, LineSource, Reporter};
use crate::domain::{HandlerFailure, Mode, Registry};

pub const DEFAULT_HOSTNAME: &str = "Auld CLI";

/// 한 줄 처리 후 루프가 취할 동작.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

/// 실행 중인 쉘 하나의 상태.
/// 레지스트리는 공유 참조로만 들고 있으며 변경하지 않는다.
pub struct Session<'a> {
    mode: Mode,
    registry: &'a Registry,
    reporter: &'a dyn Reporter,
    hostname: String,
}

impl<'a> Session<'a> {
    pub fn new(registry: &'a Registry, reporter: &'a dyn Reporter) -> Self {
        Self {
            mode: Mode::Normal,
            registry,
            reporter,
            hostname: DEFAULT_HOSTNAME.to_string(),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::info!("mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// 현재 모드에 맞는 프롬프트(`host> ` / `host# `).
    pub fn prompt(&self) -> String {
        format!("{}{} ", self.hostname, self.mode.prompt_suffix())
    }

    /// 입력이 끝나거나 종료 요청이 올 때까지 루프를 돈다.
    /// 입력 소스 자체의 I/O 오류만 호출자에게 전달된다.
    pub fn run(&mut self, input: &mut dyn LineSource) -> Result<i32> {
        loop {
            let line = match input.read_line(&self.prompt())? {
                LineEvent::Line(line) => line,
                LineEvent::Interrupted => {
                    tracing::debug!("line read interrupted");
                    continue;
                }
                LineEvent::Eof => {
                    tracing::debug!("end of input in {} mode", self.mode);
                    return Ok(0);
                }
            };

            if self.execute_line(&line) == Flow::Terminate {
                return Ok(0);
            }
        }
    }

    /// 읽은 한 줄을 해석하고 핸들러를 실행한다.
    /// 해석 실패와 핸들러 실패는 한 줄 진단으로 출력하고 계속 진행한다.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Flow::Continue;
        }

        let registry = self.registry;
        let command = match registry.resolve(self.mode, &tokens) {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(input = %line.trim(), "resolve failed: {err}");
                self.reporter.error(&err.to_string());
                return Flow::Continue;
            }
        };

        let name = command.name();
        let mode = self.mode;
        match command.invoke(self) {
            Ok(code) => {
                tracing::info!("command executed: '{name}' in {mode} mode (rc={code})");
                self.interpret(code)
            }
            Err(cause) => {
                tracing::warn!("command failed: '{name}' in {mode} mode: {cause:#}");
                let failure = HandlerFailure {
                    command: name,
                    cause,
                };
                self.reporter.error(&failure.to_string());
                Flow::Continue
            }
        }
    }

    fn interpret(&self, code: i32) -> Flow {
        if code < 0 {
            return Flow::Terminate;
        }
        if code > 0 {
            self.reporter.raw(&format!("(rc={code})"));
        }
        Flow::Continue
    }
}
