//! Application layer
//! 쉘 세션(모드 상태 + 루프)과 내장 명령을 정의하고 포트를 통해 입출력한다.

pub mod catalog;
pub mod handlers;
pub mod ports;
pub mod session;
pub mod usecases;
