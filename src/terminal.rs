/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Revisr.
 *
 * Revisr is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Revisr is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Revisr.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::{io::Stdout, sync::Mutex};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::StatefulWidget, Terminal};

use crate::{RevisrError, UiError};

///Owns the terminal for the lifetime of a practice session. Dropping it
///restores the terminal in reverse order of setup.
pub struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    #[allow(unused)]
    guard: MouseCapture,
}

impl Screen {
    pub fn new() -> Result<Screen, UiError> {
        let raw_mode = RawMode::enable()?;
        let alt_screen = AltScreen::enter(raw_mode)?;
        let guard = MouseCapture::enable(alt_screen)?;
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

        Ok(Screen { terminal, guard })
    }

    pub fn render_stateful_widget<W: StatefulWidget>(
        &mut self,
        widget: W,
        state: &mut W::State,
    ) -> Result<(), RevisrError> {
        self.terminal
            .draw(|frame| frame.render_stateful_widget(widget, frame.size(), state))
            .map_err(UiError::Io)?;
        Ok(())
    }
}

static IN_USE: Mutex<bool> = Mutex::new(false);

///Only one `Screen` may exist at a time.
struct Lock;

impl Lock {
    fn acquire() -> Result<Lock, UiError> {
        let mut in_use = IN_USE.lock().map_err(|_| UiError::Poisoned)?;
        if *in_use {
            return Err(UiError::InUse);
        }
        *in_use = true;
        Ok(Lock)
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        if let Ok(mut in_use) = IN_USE.lock() {
            *in_use = false;
        }
    }
}

#[repr(transparent)]
struct RawMode(Lock);

impl RawMode {
    fn enable() -> Result<RawMode, UiError> {
        let lock = Lock::acquire()?;
        enable_raw_mode()?;
        Ok(RawMode(lock))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[repr(transparent)]
struct AltScreen(RawMode);

impl AltScreen {
    fn enter(raw_mode: RawMode) -> Result<Self, UiError> {
        execute!(std::io::stdout(), EnterAlternateScreen)?;
        Ok(Self(raw_mode))
    }
}

impl Drop for AltScreen {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

#[repr(transparent)]
struct MouseCapture(AltScreen);

impl MouseCapture {
    fn enable(alt_screen: AltScreen) -> Result<Self, UiError> {
        execute!(std::io::stdout(), EnableMouseCapture)?;
        Ok(Self(alt_screen))
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
    }
}
