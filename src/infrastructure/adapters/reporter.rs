//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
/// 일반 출력은 stdout, 진단은 stderr로 보낸다.
pub struct ConsoleReporter {
    color_errors: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 진단 메시지에 색을 입힌다.
    pub fn new() -> Self {
        Self {
            color_errors: io::stderr().is_terminal(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn kv(&self, key: &str, value: &str) {
        println!("{:<12}: {}", key, value);
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }

    fn error(&self, message: &str) {
        if self.color_errors {
            eprintln!("\x1b[31m% {message}\x1b[0m");
        } else {
            eprintln!("% {message}");
        }
    }
}
