//! 터미널 한 줄 입력기.
//! TTY에서는 raw mode 라인 편집을, 그 외에는 일반 stdin 라인 읽기를 쓴다.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::application::ports::{LineEvent, LineSource};

/// raw mode 밖에서 받은 SIGINT. 다음 줄 읽기가 끝날 때 소비된다.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static INTERRUPT_HANDLER: Once = Once::new();

/// SIGINT가 프로세스를 끝내지 않고 플래그만 세우도록 한 번 등록한다.
fn install_interrupt_handler() {
    INTERRUPT_HANDLER.call_once(|| {
        if let Err(err) = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst)) {
            tracing::warn!("failed to set ctrl-c handler: {err}");
        }
    });
}

/// stdin/stdout 기반 입력 포트 구현.
pub struct TerminalLineSource {
    interactive: bool,
}

impl Default for TerminalLineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalLineSource {
    pub fn new() -> Self {
        install_interrupt_handler();
        Self {
            interactive: supports_interactive_input(),
        }
    }
}

impl LineSource for TerminalLineSource {
    /// - TTY + 지원 터미널: raw mode 라인 편집
    /// - non-TTY/미지원 터미널: 일반 라인 입력
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent> {
        if !self.interactive {
            return read_line_fallback(prompt);
        }

        match read_line_interactive(prompt) {
            Ok(event) => Ok(event),
            Err(err) => {
                // raw mode를 쓸 수 없는 환경이면 이후에도 일반 입력을 쓴다.
                tracing::debug!("interactive input unavailable: {err:#}");
                self.interactive = false;
                read_line_fallback(prompt)
            }
        }
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 편집을 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

fn read_line_fallback(prompt: &str) -> Result<LineEvent> {
    print!("{prompt}");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let event = read_buffered_line(&mut stdin.lock(), &INTERRUPTED)?;
    match event {
        // Ctrl-D 이후 다음 출력이 프롬프트 줄에 붙지 않도록 줄을 바꾼다.
        LineEvent::Eof => println!(),
        LineEvent::Interrupted => println!("^C"),
        LineEvent::Line(_) => {}
    }
    Ok(event)
}

/// 한 줄을 읽는다. 읽는 동안 인터럽트가 들어왔으면 그 줄은 버린다.
/// UTF-8이 아닌 바이트는 대체 문자로 바꿔 잘못된 입력으로 처리되게 한다.
fn read_buffered_line<R: BufRead>(
    reader: &mut R,
    interrupted: &AtomicBool,
) -> io::Result<LineEvent> {
    let mut buf = Vec::new();
    let read = reader.read_until(b'\n', &mut buf)?;

    if interrupted.swap(false, Ordering::SeqCst) {
        return Ok(LineEvent::Interrupted);
    }
    if read == 0 {
        return Ok(LineEvent::Eof);
    }
    Ok(LineEvent::Line(trim_newline(
        String::from_utf8_lossy(&buf).into_owned(),
    )))
}

fn read_line_interactive(prompt: &str) -> Result<LineEvent> {
    let mut stdout = io::stdout();
    let _guard = InputGuard::enter(&mut stdout)?;
    let mut editor = LineEditor::default();

    loop {
        render_line(&mut stdout, prompt, &editor)?;

        let outcome = match event::read()? {
            Event::Paste(text) => {
                editor.insert_str(&text);
                EditOutcome::Pending
            }
            Event::Key(key) => editor.handle_key(key),
            _ => EditOutcome::Pending,
        };

        match outcome {
            EditOutcome::Pending => {}
            EditOutcome::Submit(line) => {
                write!(stdout, "\r\n")?;
                stdout.flush()?;
                return Ok(LineEvent::Line(line));
            }
            EditOutcome::Interrupt => {
                write!(stdout, "^C\r\n")?;
                stdout.flush()?;
                return Ok(LineEvent::Interrupted);
            }
            EditOutcome::Eof => {
                write!(stdout, "\r\n")?;
                stdout.flush()?;
                return Ok(LineEvent::Eof);
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum EditOutcome {
    Pending,
    Submit(String),
    Interrupt,
    Eof,
}

/// 커서 위치(문자 단위)를 가진 편집 버퍼.
#[derive(Debug, Default)]
struct LineEditor {
    input: String,
    cursor_chars: usize,
}

impl LineEditor {
    fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        if key.kind != KeyEventKind::Press {
            return EditOutcome::Pending;
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return EditOutcome::Submit(std::mem::take(&mut self.input)),
            KeyCode::Char('c') if control => return EditOutcome::Interrupt,
            // 빈 줄에서만 입력 종료로 본다.
            KeyCode::Char('d') if control => {
                if self.input.is_empty() {
                    return EditOutcome::Eof;
                }
            }
            KeyCode::Char('a') if control => self.cursor_chars = 0,
            KeyCode::Char('e') if control => self.cursor_chars = self.char_count(),
            KeyCode::Char('u') if control => {
                let tail = self.input.split_off(byte_index_at_char(&self.input, self.cursor_chars));
                self.input = tail;
                self.cursor_chars = 0;
            }
            KeyCode::Char(ch) => {
                if !control && !key.modifiers.contains(KeyModifiers::ALT) {
                    insert_char_at(&mut self.input, self.cursor_chars, ch);
                    self.cursor_chars += 1;
                }
            }
            KeyCode::Backspace => {
                if self.cursor_chars > 0 {
                    remove_char_at(&mut self.input, self.cursor_chars - 1);
                    self.cursor_chars -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor_chars < self.char_count() {
                    remove_char_at(&mut self.input, self.cursor_chars);
                }
            }
            KeyCode::Left => self.cursor_chars = self.cursor_chars.saturating_sub(1),
            KeyCode::Right => self.cursor_chars = (self.cursor_chars + 1).min(self.char_count()),
            KeyCode::Home => self.cursor_chars = 0,
            KeyCode::End => self.cursor_chars = self.char_count(),
            _ => {}
        }
        EditOutcome::Pending
    }

    fn insert_str(&mut self, text: &str) {
        // 붙여넣기 중 줄바꿈은 공백으로 바꿔 한 줄로 유지한다.
        for ch in text.chars() {
            let ch = if ch == '\n' || ch == '\r' { ' ' } else { ch };
            insert_char_at(&mut self.input, self.cursor_chars, ch);
            self.cursor_chars += 1;
        }
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn before_cursor(&self) -> &str {
        &self.input[..byte_index_at_char(&self.input, self.cursor_chars)]
    }
}

fn render_line(stdout: &mut io::Stdout, prompt: &str, editor: &LineEditor) -> Result<()> {
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    write!(stdout, "{prompt}{}", editor.input)?;

    let column = display_width(prompt) + display_width(editor.before_cursor());
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    execute!(stdout, cursor::MoveToColumn(column), cursor::Show)?;
    stdout.flush()?;
    Ok(())
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

// unicode-width 크레이트를 사용하여 정확한 터미널 표시 폭을 계산한다.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

struct InputGuard;

impl InputGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}
