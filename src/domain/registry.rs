//! 모드별 명령 저장소와 축약 입력 해석 규칙.

use anyhow::Result;

use crate::application::session::Session;
use crate::domain::command::Command;
use crate::domain::error::{Alternatives, RegistryError, ResolveError};
use crate::domain::mode::Mode;

/// 모드별로 등록 순서를 보존하는 명령 모음.
/// 시작 단계에서 채운 뒤 세션 동안은 읽기 전용으로 쓴다.
#[derive(Debug, Default)]
pub struct Registry {
    normal: Vec<Command>,
    privileged: Vec<Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 모드에 동일한 토큰 열이 이미 있으면 거부한다.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        let bucket = self.bucket_mut(command.mode());
        if bucket.iter().any(|c| c.tokens() == command.tokens()) {
            return Err(RegistryError::Duplicate {
                mode: command.mode(),
                name: command.name(),
            });
        }
        bucket.push(command);
        Ok(())
    }

    /// `"show version"` 형태의 문자열로 바로 등록한다.
    pub fn add<F>(
        &mut self,
        words: &str,
        mode: Mode,
        description: &str,
        handler: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&mut Session<'_>) -> Result<i32> + Send + Sync + 'static,
    {
        self.register(Command::from_words(words, mode, description, handler)?)
    }

    /// 등록 순서 그대로의 명령 목록.
    pub fn commands(&self, mode: Mode) -> &[Command] {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Privileged => &self.privileged,
        }
    }

    /// 토큰 열 사전순으로 정렬한 목록. 도움말 출력에 쓴다.
    pub fn list(&self, mode: Mode) -> Vec<&Command> {
        let mut out: Vec<&Command> = self.commands(mode).iter().collect();
        sort_by_tokens(&mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.normal.len() + self.privileged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 입력 토큰을 위치별 접두사로 받아들이는 모든 명령(등록 순).
    pub fn candidates<S: AsRef<str>>(&self, mode: Mode, input: &[S]) -> Vec<&Command> {
        self.commands(mode)
            .iter()
            .filter(|c| c.accepts_prefix(input))
            .collect()
    }

    /// 축약 입력을 정확히 하나의 명령으로 해석한다.
    ///
    /// 토큰 수가 같은 후보(완전 일치)만 먼저 본다. 완전 일치가 없으면
    /// 후보 유무에 따라 미등록/미완성으로, 둘 이상이면 모호로 판정한다.
    pub fn resolve<S: AsRef<str>>(&self, mode: Mode, input: &[S]) -> Result<&Command, ResolveError> {
        if input.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        let mut candidates = self.candidates(mode, input);
        let mut full: Vec<&Command> = candidates
            .iter()
            .copied()
            .filter(|c| c.is_full_match(input))
            .collect();

        match full.len() {
            1 => Ok(full[0]),
            0 if candidates.is_empty() => Err(ResolveError::NotFound(join_input(input))),
            0 => {
                sort_by_tokens(&mut candidates);
                Err(ResolveError::Incomplete(alternatives(&candidates)))
            }
            _ => {
                sort_by_tokens(&mut full);
                Err(ResolveError::Ambiguous(alternatives(&full)))
            }
        }
    }

    fn bucket_mut(&mut self, mode: Mode) -> &mut Vec<Command> {
        match mode {
            Mode::Normal => &mut self.normal,
            Mode::Privileged => &mut self.privileged,
        }
    }
}

fn sort_by_tokens(commands: &mut [&Command]) {
    commands.sort_by(|a, b| a.tokens().cmp(b.tokens()));
}

fn alternatives(commands: &[&Command]) -> Alternatives {
    Alternatives::from_sorted(commands.iter().map(|c| c.name()).collect())
}

fn join_input<S: AsRef<str>>(input: &[S]) -> String {
    input.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::STATUS_OK;

    fn registry(entries: &[(&str, Mode)]) -> Registry {
        let mut registry = Registry::new();
        for (words, mode) in entries {
            registry
                .add(words, *mode, "test", |_| Ok(STATUS_OK))
                .unwrap();
        }
        registry
    }

    fn resolve_name(registry: &Registry, mode: Mode, input: &[&str]) -> String {
        registry.resolve(mode, input).unwrap().name()
    }

    #[test]
    fn exact_tokens_resolve_to_their_command() {
        let reg = registry(&[
            ("show version", Mode::Normal),
            ("show commands", Mode::Normal),
            ("configure", Mode::Normal),
        ]);
        for cmd in reg.commands(Mode::Normal) {
            let input: Vec<&str> = cmd.tokens().iter().map(String::as_str).collect();
            assert_eq!(reg.resolve(Mode::Normal, &input).unwrap().name(), cmd.name());
        }
    }

    #[test]
    fn unambiguous_abbreviation_resolves() {
        let reg = registry(&[
            ("show version", Mode::Normal),
            ("show commands", Mode::Normal),
            ("show ip interface brief", Mode::Normal),
        ]);
        assert_eq!(resolve_name(&reg, Mode::Normal, &["sho", "ver"]), "show version");
        assert_eq!(resolve_name(&reg, Mode::Normal, &["s", "c"]), "show commands");
        assert_eq!(
            resolve_name(&reg, Mode::Normal, &["sho", "ip", "int", "bri"]),
            "show ip interface brief"
        );
    }

    #[test]
    fn strict_prefix_of_longer_command_is_incomplete() {
        let reg = registry(&[("show version", Mode::Normal)]);
        let err = reg.resolve(Mode::Normal, &["show"]).unwrap_err();
        assert!(matches!(err, ResolveError::Incomplete(_)));
        assert!(err.to_string().contains("show version"));
        assert_eq!(
            err.to_string(),
            "incomplete command. did you mean: show version"
        );
    }

    #[test]
    fn equal_length_matches_are_ambiguous() {
        let reg = registry(&[("shutdown", Mode::Normal), ("show", Mode::Normal)]);
        let err = reg.resolve(Mode::Normal, &["sh"]).unwrap_err();
        let ResolveError::Ambiguous(alts) = &err else {
            panic!("expected ambiguity, got {err:?}");
        };
        assert_eq!(alts.names(), ["show", "shutdown"]);
        assert_eq!(err.to_string(), "ambiguous command: show, shutdown");
    }

    #[test]
    fn unmatched_input_is_not_found() {
        let reg = registry(&[("show version", Mode::Normal)]);
        assert_eq!(
            reg.resolve(Mode::Normal, &["bogus"]).unwrap_err(),
            ResolveError::NotFound("bogus".into())
        );
        assert_eq!(
            reg.resolve(Mode::Normal, &["show", "version", "now"]).unwrap_err(),
            ResolveError::NotFound("show version now".into())
        );
    }

    #[test]
    fn empty_input_is_rejected_regardless_of_contents() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Registry::new().resolve(Mode::Normal, &empty).unwrap_err(),
            ResolveError::EmptyInput
        );
        let reg = registry(&[("exit", Mode::Normal), ("exit", Mode::Privileged)]);
        assert_eq!(
            reg.resolve(Mode::Privileged, &empty).unwrap_err(),
            ResolveError::EmptyInput
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let reg = registry(&[("show", Mode::Normal)]);
        assert!(matches!(
            reg.resolve(Mode::Normal, &["SHOW"]),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn resolution_is_scoped_to_mode() {
        let reg = registry(&[("show status", Mode::Privileged)]);
        assert!(matches!(
            reg.resolve(Mode::Normal, &["show", "status"]),
            Err(ResolveError::NotFound(_))
        ));
        assert_eq!(
            resolve_name(&reg, Mode::Privileged, &["sh", "st"]),
            "show status"
        );
    }

    #[test]
    fn short_exact_command_wins_over_longer_prefix() {
        let reg = registry(&[("show", Mode::Normal), ("show version", Mode::Normal)]);
        assert_eq!(resolve_name(&reg, Mode::Normal, &["sh"]), "show");
    }

    #[test]
    fn duplicate_tokens_in_same_mode_are_rejected() {
        let mut reg = registry(&[("exit", Mode::Normal)]);
        let err = reg
            .add("exit", Mode::Normal, "again", |_| Ok(STATUS_OK))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                mode: Mode::Normal,
                name: "exit".into()
            }
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn same_tokens_in_different_modes_are_independent() {
        let reg = registry(&[("exit", Mode::Normal), ("exit", Mode::Privileged)]);
        assert_eq!(reg.commands(Mode::Normal).len(), 1);
        assert_eq!(reg.commands(Mode::Privileged).len(), 1);
        assert_eq!(resolve_name(&reg, Mode::Privileged, &["ex"]), "exit");
    }

    #[test]
    fn listing_is_sorted_independent_of_registration_order() {
        let reg = registry(&[
            ("show version", Mode::Normal),
            ("configure", Mode::Normal),
            ("show commands", Mode::Normal),
            ("?", Mode::Normal),
        ]);
        let names: Vec<String> = reg.list(Mode::Normal).iter().map(|c| c.name()).collect();
        assert_eq!(names, ["?", "configure", "show commands", "show version"]);
        assert!(reg.list(Mode::Privileged).is_empty());
    }

    #[test]
    fn incomplete_listing_is_capped_at_ten() {
        let mut reg = Registry::new();
        for i in 0..12 {
            reg.add(&format!("debug item{i:02}"), Mode::Normal, "", |_| Ok(0))
                .unwrap();
        }
        let err = reg.resolve(Mode::Normal, &["debug"]).unwrap_err();
        let ResolveError::Incomplete(alts) = &err else {
            panic!("expected incomplete, got {err:?}");
        };
        assert_eq!(alts.names().len(), 10);
        assert!(alts.is_truncated());
        assert_eq!(alts.names()[0], "debug item00");
        assert!(err.to_string().ends_with(", ..."));
    }
}
