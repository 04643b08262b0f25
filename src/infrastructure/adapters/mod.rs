//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod reporter;
mod terminal_input;

pub use config_repository::JsonConfigRepository;
pub use reporter::ConsoleReporter;
pub use terminal_input::TerminalLineSource;
