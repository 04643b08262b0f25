//! `auld` 바이너리 진입점.

use std::process::ExitCode;

use auld::infrastructure::logging;
use auld::interface::cli::{AppComposition, Cli, CliAction, run_repl};

fn main() -> ExitCode {
    let (action, overrides) = Cli::parse_action();
    let composition = AppComposition::default();

    let config = match composition.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(1);
        }
    };
    let settings = overrides.resolve(&config);

    // 파일 로그 writer는 main이 끝날 때까지 살아 있어야 한다.
    let _log_guard = match logging::init(&settings.log) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(1);
        }
    };

    tracing::info!("auld starting");
    let code = match action {
        CliAction::InspectConfig => match composition.inspect_config() {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(err) => {
                eprintln!("error: {err:#}");
                1
            }
        },
        CliAction::Interactive => match run_repl(&composition, &settings) {
            Ok(code) => code,
            Err(err) => {
                tracing::error!("shell aborted: {err:#}");
                eprintln!("error: {err:#}");
                1
            }
        },
    };
    tracing::info!("auld shutting down");

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
