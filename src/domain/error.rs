//! 명령 등록/해석 단계의 오류 분류.

use std::fmt;

use thiserror::Error;

use crate::domain::mode::Mode;

/// 진단 메시지에 나열할 후보 최대 개수.
pub const MAX_LISTED_ALTERNATIVES: usize = 10;

/// 모호/미완성 진단에 표시할 후보 목록.
/// 정렬된 전체 후보에서 앞쪽 일부만 보관하고 잘림 여부를 기록한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternatives {
    shown: Vec<String>,
    truncated: bool,
}

impl Alternatives {
    pub fn from_sorted(names: Vec<String>) -> Self {
        let truncated = names.len() > MAX_LISTED_ALTERNATIVES;
        let shown = names.into_iter().take(MAX_LISTED_ALTERNATIVES).collect();
        Self { shown, truncated }
    }

    pub fn names(&self) -> &[String] {
        &self.shown
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Alternatives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shown.join(", "))?;
        if self.truncated {
            f.write_str(", ...")?;
        }
        Ok(())
    }
}

/// 입력 토큰을 명령으로 해석하지 못한 이유.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("empty input")]
    EmptyInput,
    #[error("unknown command: \"{0}\"")]
    NotFound(String),
    #[error("incomplete command. did you mean: {0}")]
    Incomplete(Alternatives),
    #[error("ambiguous command: {0}")]
    Ambiguous(Alternatives),
}

/// 시작 시 레지스트리 구성 오류. 발생하면 초기화를 중단한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate command in mode {mode}: {name}")]
    Duplicate { mode: Mode, name: String },
    #[error("invalid command tokens {tokens:?}: {reason}")]
    InvalidTokens { tokens: Vec<String>, reason: &'static str },
}

/// 핸들러 실행 중 발생한 예기치 않은 실패.
#[derive(Debug, Error)]
#[error("handler error: {command}: {cause:#}")]
pub struct HandlerFailure {
    pub command: String,
    pub cause: anyhow::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("cmd{i:02}")).collect()
    }

    #[test]
    fn alternatives_within_limit_are_not_truncated() {
        let alts = Alternatives::from_sorted(names(3));
        assert!(!alts.is_truncated());
        assert_eq!(alts.to_string(), "cmd00, cmd01, cmd02");
    }

    #[test]
    fn alternatives_beyond_limit_end_with_ellipsis() {
        let alts = Alternatives::from_sorted(names(12));
        assert!(alts.is_truncated());
        assert_eq!(alts.names().len(), MAX_LISTED_ALTERNATIVES);
        assert!(alts.to_string().ends_with("cmd09, ..."));
        assert!(!alts.to_string().contains("cmd10"));
    }

    #[test]
    fn exactly_ten_alternatives_have_no_marker() {
        let alts = Alternatives::from_sorted(names(10));
        assert!(!alts.is_truncated());
        assert!(!alts.to_string().contains("..."));
    }

    #[test]
    fn messages_match_shell_wording() {
        assert_eq!(
            ResolveError::NotFound("bogus cmd".into()).to_string(),
            "unknown command: \"bogus cmd\""
        );
        let dup = RegistryError::Duplicate {
            mode: Mode::Privileged,
            name: "show version".into(),
        };
        assert_eq!(dup.to_string(), "duplicate command in mode admin: show version");
    }

    #[test]
    fn handler_failure_includes_command_and_cause() {
        let failure = HandlerFailure {
            command: "show status".into(),
            cause: anyhow::anyhow!("boom"),
        };
        assert_eq!(failure.to_string(), "handler error: show status: boom");
    }
}
