//! Interface layer
//! 명령행 인자와 터미널 세션을 애플리케이션 계층에 연결한다.

pub mod cli;
