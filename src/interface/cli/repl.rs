//! `auld` 대화형 쉘(REPL) 인터페이스.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::infrastructure::adapters::TerminalLineSource;
use crate::interface::cli::command::LaunchSettings;
use crate::interface::cli::composition::AppComposition;

/// 배너를 출력하고 터미널 입력으로 쉘 루프를 실행한다.
pub fn run_repl(composition: &AppComposition, settings: &LaunchSettings) -> Result<i32> {
    if settings.banner {
        print_welcome(&settings.shell.hostname);
        io::stdout().flush()?;
    }

    let mut input = TerminalLineSource::new();
    composition
        .run_shell_usecase()
        .execute(&mut input, &settings.shell)
}

/// 배너 안쪽 폭(테두리와 양쪽 공백 제외).
const BOX_WIDTH: usize = 58;

/// 색을 입힐 수 있는 배너 한 조각.
type Segment<'a> = (&'a str, Option<&'a str>);

fn print_welcome(hostname: &str) {
    let interactive = io::stdout().is_terminal();
    let title = format!("{hostname} interactive shell");
    let version = format!("auld {}", env!("CARGO_PKG_VERSION"));
    let border = format!("+{}+", "-".repeat(BOX_WIDTH + 2));

    println!("{border}");
    println!("{}", box_row(&[(title.as_str(), Some("1;36"))], interactive));
    println!("{}", box_row(&[(version.as_str(), Some("2;37"))], interactive));
    println!("{border}");
    println!(
        "{}",
        box_row(
            &[(" ", None), ("?", Some("1;33")), (" list commands for the current mode", None)],
            interactive,
        )
    );
    println!(
        "{}",
        box_row(
            &[(" ", None), ("configure", Some("1;32")), (" enter privileged mode", None)],
            interactive,
        )
    );
    println!(
        "{}",
        box_row(
            &[(" ", None), ("exit", Some("1;31")), (" leave privileged mode / quit", None)],
            interactive,
        )
    );
    println!(
        "{}",
        box_row(
            &[(" abbreviations work: `sho ver` = `show version`", None)],
            interactive,
        )
    );
    println!("{border}");
    println!();
}

/// 평문 기준으로 폭을 맞춘 뒤 색을 입힌 배너 한 줄.
/// 잘라야 하는 줄은 색 없이 출력한다.
fn box_row(segments: &[Segment<'_>], interactive: bool) -> String {
    let plain: String = segments.iter().map(|(text, _)| *text).collect();
    let fitted = fit_box_line(&plain, BOX_WIDTH);

    let body = if fitted == plain {
        segments
            .iter()
            .map(|(text, ansi)| match ansi {
                Some(ansi) => paint(text, ansi, interactive),
                None => text.to_string(),
            })
            .collect()
    } else {
        fitted.clone()
    };

    let pad = BOX_WIDTH.saturating_sub(UnicodeWidthStr::width(fitted.as_str()));
    format!("| {body}{} |", " ".repeat(pad))
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// 표시 폭이 `width`를 넘으면 `...`를 붙여 자른다.
fn fit_box_line(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let keep = width - 3;
    let mut used = 0;
    let mut head = String::new();
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > keep {
            break;
        }
        used += w;
        head.push(ch);
    }
    format!("{head}...")
}
