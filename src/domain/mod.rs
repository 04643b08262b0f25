//! Domain layer
//! 명령 정의/모드/해석 규칙을 입출력 없이 표현한다.

pub mod command;
pub mod error;
pub mod mode;
pub mod registry;

pub use command::{Command, Handler, STATUS_OK, STATUS_TERMINATE};
pub use error::{Alternatives, HandlerFailure, RegistryError, ResolveError};
pub use mode::Mode;
pub use registry::Registry;
