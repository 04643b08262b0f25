//! 쉘 모드(일반/특권) 값 객체.

use std::fmt;

/// 명령 가시성과 프롬프트를 결정하는 두 가지 모드.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    Privileged,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Normal, Mode::Privileged];

    /// 목록/로그에 쓰는 모드 이름.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "user",
            Mode::Privileged => "admin",
        }
    }

    /// 프롬프트 끝에 붙는 구분 문자.
    pub fn prompt_suffix(self) -> char {
        match self {
            Mode::Normal => '>',
            Mode::Privileged => '#',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
