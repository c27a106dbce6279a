//! Arrow-key selection menus.
//!
//! Raw mode is held only while a menu is on screen and always released
//! before returning, including on the escape paths.

use anyhow::Result;
use crossterm::{
    cursor, execute,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::Stylize,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};

const CURSOR_ICON: &str = "➤";

/// Show an arrow-key menu and return the chosen index, or `None` when the
/// user backs out (Esc, `q`, or ctrl-c).
pub fn select(title: &str, options: &[String]) -> Result<Option<usize>> {
    let mut stdout = io::stdout();
    println!("\n🔧 {}", title.grey());

    terminal::enable_raw_mode()?;
    let result = run_menu(&mut stdout, options);
    terminal::disable_raw_mode()?;

    println!();
    result
}

fn run_menu(stdout: &mut io::Stdout, options: &[String]) -> Result<Option<usize>> {
    let mut selected = 0usize;
    draw(stdout, options, selected)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Up if selected > 0 => {
                selected -= 1;
                redraw(stdout, options, selected)?;
            }
            KeyCode::Down if selected + 1 < options.len() => {
                selected += 1;
                redraw(stdout, options, selected)?;
            }
            KeyCode::Enter => return Ok(Some(selected)),
            KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            _ => {}
        }
    }
}

fn draw(stdout: &mut io::Stdout, options: &[String], selected: usize) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        if i == selected {
            write!(stdout, "{} {}\r\n", CURSOR_ICON, option.as_str().cyan())?;
        } else {
            write!(stdout, "  {option}\r\n")?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn redraw(stdout: &mut io::Stdout, options: &[String], selected: usize) -> Result<()> {
    execute!(
        stdout,
        cursor::MoveUp(options.len() as u16),
        Clear(ClearType::FromCursorDown)
    )?;
    draw(stdout, options, selected)
}
