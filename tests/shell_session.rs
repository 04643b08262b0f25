//! 기본 명령 레지스트리로 세션 루프 전체를 구동하는 통합 테스트.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use pretty_assertions::assert_eq;

use auld::application::catalog::build_default_registry;
use auld::application::ports::{LineEvent, LineSource, Reporter};
use auld::application::session::Session;
use auld::domain::{Mode, Registry};

/// 미리 정한 입력 이벤트를 순서대로 돌려주고, 받은 프롬프트를 기록한다.
struct ScriptedInput {
    events: VecDeque<LineEvent>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    fn new(events: impl IntoIterator<Item = LineEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| LineEvent::Line(l.to_string())))
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent> {
        self.prompts.push(prompt.to_string());
        Ok(self.events.pop_front().unwrap_or(LineEvent::Eof))
    }
}

#[derive(Default)]
struct CaptureReporter {
    out: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl CaptureReporter {
    fn out(&self) -> Vec<String> {
        self.out.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Reporter for CaptureReporter {
    fn kv(&self, key: &str, value: &str) {
        self.raw(&format!("{key}: {value}"));
    }

    fn raw(&self, line: &str) {
        self.out.lock().unwrap().push(line.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

fn names(registry: &Registry, mode: Mode) -> Vec<String> {
    registry.list(mode).iter().map(|c| c.name()).collect()
}

#[test]
fn exit_in_normal_mode_terminates_with_zero() {
    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::lines(&["exit", "show version"]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    // 종료 후에는 더 읽지 않는다.
    assert_eq!(input.prompts, ["Auld CLI> "]);
    assert!(reporter.out().is_empty());
}

#[test]
fn privileged_round_trip_restores_normal_mode() {
    let registry = build_default_registry().unwrap();
    let before_normal = names(&registry, Mode::Normal);
    let before_privileged = names(&registry, Mode::Privileged);

    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::lines(&["conf", "sh st", "ex"]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    assert_eq!(session.mode(), Mode::Normal);
    assert_eq!(input.prompts, ["Auld CLI> ", "Auld CLI# ", "Auld CLI# ", "Auld CLI> "]);
    assert_eq!(reporter.out(), ["System status: OK", "Current mode: admin"]);

    assert_eq!(names(&registry, Mode::Normal), before_normal);
    assert_eq!(names(&registry, Mode::Privileged), before_privileged);
}

#[test]
fn end_of_input_terminates_in_any_mode() {
    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::new([LineEvent::Line("enable".into()), LineEvent::Eof]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    assert_eq!(session.mode(), Mode::Privileged);
}

#[test]
fn interrupt_neither_terminates_nor_changes_mode() {
    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::new([
        LineEvent::Line("configure".into()),
        LineEvent::Interrupted,
        LineEvent::Interrupted,
        LineEvent::Line("show status".into()),
    ]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    assert_eq!(session.mode(), Mode::Privileged);
    assert_eq!(
        input.prompts,
        ["Auld CLI> ", "Auld CLI# ", "Auld CLI# ", "Auld CLI# ", "Auld CLI# "]
    );
    assert_eq!(reporter.out()[0], "System status: OK");
}

#[test]
fn bad_input_is_reported_and_loop_continues() {
    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::lines(&["", "   ", "bogus", "sh", "e", "show version"]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    assert_eq!(
        reporter.errors(),
        [
            "unknown command: \"bogus\"",
            "incomplete command. did you mean: show commands, show version",
            "ambiguous command: enable, exit",
        ]
    );
    assert_eq!(
        reporter.out(),
        ["name: auld".to_string(), format!("version: {}", env!("CARGO_PKG_VERSION"))]
    );
}

#[test]
fn undecodable_input_is_reported_as_unknown_command() {
    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::lines(&["sho\u{FFFD} ver", "exit"]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    assert_eq!(reporter.errors(), ["unknown command: \"sho\u{FFFD} ver\""]);
    assert_eq!(input.prompts.len(), 2);
}

#[test]
fn help_lists_only_current_mode_sorted() {
    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    let mut input = ScriptedInput::lines(&["?"]);

    session.run(&mut input).unwrap();
    let out = reporter.out();
    assert_eq!(out[0], "Available commands in user mode:");

    let listed: Vec<&str> = out[1..]
        .iter()
        .map(|line| line[..30].trim())
        .collect();
    assert_eq!(
        listed,
        ["?", "configure", "enable", "exit", "help", "show commands", "show version"]
    );
    assert!(out.iter().all(|line| !line.contains("show status")));
}

#[test]
fn handler_failures_and_codes_are_non_fatal() {
    let mut registry = Registry::new();
    registry
        .add("explode", Mode::Normal, "always fails", |_| {
            anyhow::bail!("disk on fire")
        })
        .unwrap();
    registry
        .add("partial", Mode::Normal, "returns a warning code", |_| Ok(2))
        .unwrap();
    registry
        .add("stop", Mode::Normal, "requests exit", |_| Ok(-7))
        .unwrap();

    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter).with_hostname("Router");
    let mut input = ScriptedInput::lines(&["explode", "part", "stop", "partial"]);

    assert_eq!(session.run(&mut input).unwrap(), 0);
    assert_eq!(reporter.errors(), ["handler error: explode: disk on fire"]);
    assert_eq!(reporter.out(), ["(rc=2)"]);
    assert_eq!(input.prompts.len(), 3);
    assert_eq!(input.prompts[0], "Router> ");
}

#[test]
fn source_errors_are_propagated() {
    struct Broken;

    impl LineSource for Broken {
        fn read_line(&mut self, _prompt: &str) -> Result<LineEvent> {
            anyhow::bail!("stdin closed unexpectedly")
        }
    }

    let registry = build_default_registry().unwrap();
    let reporter = CaptureReporter::default();
    let mut session = Session::new(&registry, &reporter);
    assert!(session.run(&mut Broken).is_err());
}
