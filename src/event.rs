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

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::UiError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UserInput {
    Practice(usize),
    Draw,
    Save,
    Resize,
    Quit,
}

///Drops anything typed while the previous screen was drawing, then blocks
///until an event maps to an input.
pub fn next_input(item_areas: &[Rect]) -> Result<UserInput, UiError> {
    while event::poll(Duration::from_millis(0))? {
        event::read()?;
    }

    loop {
        if event::poll(Duration::MAX)? {
            if let Some(input) = match_user_input(event::read()?, item_areas) {
                return Ok(input);
            }
        }
    }
}

///Number keys only select items that were actually rendered into `item_areas`.
pub fn match_user_input(event: Event, item_areas: &[Rect]) -> Option<UserInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|digit| digit as usize - 1)
                .filter(|&slot| slot < item_areas.len())
                .map(UserInput::Practice),
            KeyCode::Enter | KeyCode::Char('n') => Some(UserInput::Draw),
            KeyCode::Char('s') => Some(UserInput::Save),
            KeyCode::Esc | KeyCode::Char('q') => Some(UserInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            ..
        }) => item_areas
            .iter()
            .position(|area| area.contains(Position::from((column, row))))
            .map(UserInput::Practice),
        _ => None,
    }
}
