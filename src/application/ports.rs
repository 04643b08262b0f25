//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;

use crate::infrastructure::config::Config;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 한 줄 읽기 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    /// 사용자가 현재 줄 입력을 취소했다(Ctrl-C).
    Interrupted,
    /// 입력 스트림 종료(Ctrl-D, 파이프 끝).
    Eof,
}

/// 프롬프트를 띄우고 한 줄을 읽는 입력 포트.
/// 쉘 루프에서 유일하게 블로킹되는 지점이다.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent>;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn kv(&self, key: &str, value: &str);
    fn raw(&self, line: &str);
    /// 한 줄짜리 진단 메시지.
    fn error(&self, message: &str);
}
