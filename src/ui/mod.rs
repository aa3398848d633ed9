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

use std::path::PathBuf;

use rand::Rng;
use tracing::{error, warn};

use widget::{PracticeWidget, PracticeWidgetState};

use crate::{
    event::{next_input, UserInput},
    progress::ChartMode,
    session::Session,
    terminal::Screen,
    RevisrError,
};

mod chart;
mod widget;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Default for Status {
    fn default() -> Self {
        Self::Info(String::new())
    }
}

pub struct PracticeOptions {
    pub count: usize,
    pub chart: ChartMode,
    pub out: PathBuf,
    ///Set when the catalog failed to load. Saving must then never replace an
    ///existing file with the empty session.
    pub load_failed: bool,
}

///What happened over one run of the practice screen.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PracticeSummary {
    pub practiced: usize,
    pub exports: usize,
    pub unsaved: bool,
}

///Applies one input to the session. Every failure is reported through the
///status line so the session keeps going. Returns `false` on quit.
pub(crate) fn apply_input(
    input: UserInput,
    session: &mut Session,
    options: &PracticeOptions,
    summary: &mut PracticeSummary,
    status: &mut Status,
    rng: &mut impl Rng,
) -> bool {
    match input {
        UserInput::Practice(slot) => {
            if let Some(counter) = session.mark_practiced(slot) {
                summary.practiced += 1;
                summary.unsaved = true;
                if let Some((_, item)) = session.drawn_item(slot) {
                    *status = Status::Info(format!("{} practiced ({counter} total)", item.name));
                }
            }
        }
        UserInput::Draw => match session.draw(options.count, rng) {
            Ok(_) => *status = Status::default(),
            Err(err) => {
                warn!(%err, "unable to draw questions");
                *status = Status::Error(err.to_string());
            }
        },
        UserInput::Save if options.load_failed && options.out.exists() => {
            warn!(path = %options.out.display(), "refusing to overwrite after failed load");
            *status = Status::Error(format!(
                "Catalog failed to load, refusing to overwrite {}",
                options.out.display()
            ));
        }
        UserInput::Save => match session.export(&options.out) {
            Ok(()) => {
                summary.exports += 1;
                summary.unsaved = false;
                *status = Status::Info(format!("Saved to {}", options.out.display()));
            }
            Err(err) => {
                error!(%err, "export failed");
                *status = Status::Error(err.to_string());
            }
        },
        UserInput::Resize => {}
        UserInput::Quit => return false,
    }

    true
}

pub fn practice(
    screen: &mut Screen,
    session: &mut Session,
    options: &PracticeOptions,
    mut status: Status,
) -> Result<PracticeSummary, RevisrError> {
    let rng = &mut rand::thread_rng();
    let state = &mut PracticeWidgetState::default();
    let mut summary = PracticeSummary::default();

    loop {
        let snapshot = match session.summarize() {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                error!(%err, "unable to summarize progress");
                status = Status::Error(err.to_string());
                None
            }
        };

        screen.render_stateful_widget(
            PracticeWidget::new(session, snapshot.as_ref(), options.chart, &status),
            state,
        )?;

        let input = next_input(&state.item_areas)?;

        if !apply_input(input, session, options, &mut summary, &mut status, rng) {
            break;
        }
    }

    Ok(summary)
}
