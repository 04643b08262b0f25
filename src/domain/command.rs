//! 명령 정의(불변 엔티티)와 핸들러 계약.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::application::session::Session;
use crate::domain::error::RegistryError;
use crate::domain::mode::Mode;

/// 설명이 주어지지 않았을 때 목록에 표시하는 문구.
pub const DEFAULT_DESCRIPTION: &str = "(no help given)";

/// 핸들러 정상 종료 코드.
pub const STATUS_OK: i32 = 0;
/// 루프 종료를 요청하는 코드. 음수는 모두 종료로 해석된다.
pub const STATUS_TERMINATE: i32 = -1;

/// 명령에 묶인 실행 단위.
/// 세션을 받아 모드를 바꾸거나 출력하고 결과 코드를 돌려준다.
pub type Handler = Arc<dyn Fn(&mut Session<'_>) -> Result<i32> + Send + Sync>;

#[derive(Clone)]
pub struct Command {
    tokens: Vec<String>,
    mode: Mode,
    description: String,
    handler: Handler,
}

impl Command {
    /// 토큰 목록을 검증해 명령을 만든다.
    pub fn new<I, S, F>(
        tokens: I,
        mode: Mode,
        description: impl Into<String>,
        handler: F,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut Session<'_>) -> Result<i32> + Send + Sync + 'static,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        validate_tokens(&tokens)?;

        let description = description.into();
        let description = if description.trim().is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            description
        };

        Ok(Self {
            tokens,
            mode,
            description,
            handler: Arc::new(handler),
        })
    }

    /// 공백으로 구분된 문자열(`"show version"`)에서 명령을 만든다.
    pub fn from_words<F>(
        words: &str,
        mode: Mode,
        description: impl Into<String>,
        handler: F,
    ) -> Result<Self, RegistryError>
    where
        F: Fn(&mut Session<'_>) -> Result<i32> + Send + Sync + 'static,
    {
        Self::new(words.split_whitespace(), mode, description, handler)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 토큰을 공백 하나로 이은 전체 이름.
    pub fn name(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn invoke(&self, session: &mut Session<'_>) -> Result<i32> {
        (self.handler)(session)
    }

    /// 입력 토큰 각각이 같은 위치의 명령 토큰 접두사인지 검사한다.
    /// 입력이 명령보다 길면 후보가 아니다.
    pub fn accepts_prefix<S: AsRef<str>>(&self, input: &[S]) -> bool {
        input.len() <= self.tokens.len()
            && input
                .iter()
                .zip(&self.tokens)
                .all(|(typed, token)| token.starts_with(typed.as_ref()))
    }

    /// 입력이 모든 토큰을 빠짐없이 지정했는지(토큰 수 일치) 여부.
    pub fn is_full_match<S: AsRef<str>>(&self, input: &[S]) -> bool {
        input.len() == self.tokens.len() && self.accepts_prefix(input)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("tokens", &self.tokens)
            .field("mode", &self.mode)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn validate_tokens(tokens: &[String]) -> Result<(), RegistryError> {
    let reason = if tokens.is_empty() {
        Some("a command needs at least one token")
    } else if tokens.iter().any(|t| t.is_empty()) {
        Some("tokens must not be empty")
    } else if tokens.iter().any(|t| t.chars().any(char::is_whitespace)) {
        Some("tokens must not contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RegistryError::InvalidTokens {
            tokens: tokens.to_vec(),
            reason,
        }),
        None => Ok(()),
    }
}
