//! Hidden password entry on the terminal.

use std::{error::Error, io::Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};

type PromptResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

const MAX_ATTEMPTS: usize = 3;

/// Keeps the terminal in raw mode while alive.
struct RawMode;

impl RawMode {
    fn enable() -> PromptResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn notice(out: &mut impl Write, message: &str) -> PromptResult<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(message),
        Print("\r\n")
    )?;
    Ok(())
}

/// Read one line without echoing it, printing `*` per character.
fn read_hidden(label: &str) -> PromptResult<String> {
    let _raw = RawMode::enable()?;
    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(label)
    )?;

    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };
        let control = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Enter => break,
            KeyCode::Char('c') if control => {
                execute!(out, Print("\r\n"))?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !control => {
                secret.push(ch);
                execute!(out, Print('*'))?;
            }
            KeyCode::Backspace if secret.pop().is_some() => {
                execute!(out, cursor::MoveLeft(1), Print(' '), cursor::MoveLeft(1))?;
            }
            _ => {}
        }
        out.flush()?;
    }

    execute!(out, Print("\r\n"))?;
    Ok(secret)
}

/// Ask for a new password and its confirmation.
pub fn new_password() -> PromptResult<String> {
    let mut out = std::io::stderr();
    for _ in 0..MAX_ATTEMPTS {
        let password = read_hidden("Password: ")?;
        if password.is_empty() {
            notice(&mut out, "Password must not be empty.")?;
            continue;
        }
        if read_hidden("Confirm password: ")? == password {
            return Ok(password);
        }
        notice(&mut out, "Passwords do not match. Try again.")?;
    }

    Err("too many attempts".into())
}
