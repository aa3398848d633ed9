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

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    symbols::border,
    widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::{
    progress::{ChartMode, ProgressSnapshot},
    session::Session,
};

use super::{chart::DoughnutWidget, Status};

const COLOR_PRACTICED: Color = Color::Green;
const COLOR_ERROR: Color = Color::Red;
const ITEM_HEIGHT: u16 = 3;
const HELP: &str = "[1-9/click] practiced   [n] new questions   [s] save   [q] quit";

pub(super) struct PracticeWidget<'a> {
    session: &'a Session,
    snapshot: Option<&'a ProgressSnapshot>,
    mode: ChartMode,
    status: &'a Status,
}

impl<'a> PracticeWidget<'a> {
    pub fn new(
        session: &'a Session,
        snapshot: Option<&'a ProgressSnapshot>,
        mode: ChartMode,
        status: &'a Status,
    ) -> Self {
        Self {
            session,
            snapshot,
            mode,
            status,
        }
    }
}

#[derive(Default)]
pub(super) struct PracticeWidgetState {
    pub(super) item_areas: Vec<Rect>,
}

impl StatefulWidget for PracticeWidget<'_> {
    type State = PracticeWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let (title_area, status_area, body_area, help_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ],
            );
            let split = layout.split(area);
            (split[0], split[1], split[2], split[3])
        };

        let (items_area, chart_area) = {
            let layout = Layout::new(Direction::Horizontal, [Constraint::Ratio(1, 2); 2]);
            let split = layout.split(body_area);
            (split[0], split[1])
        };

        Paragraph::new("Revision Practice")
            .bold()
            .centered()
            .render(title_area, buf);

        match self.status {
            Status::Info(message) => Paragraph::new(message.as_str()).centered(),
            Status::Error(message) => Paragraph::new(message.as_str()).centered().fg(COLOR_ERROR),
        }
        .render(status_area, buf);

        state.item_areas.clear();
        self.render_items(items_area, buf, state);

        if let Some(snapshot) = self.snapshot {
            DoughnutWidget::new(snapshot, self.mode).render(chart_area, buf);
        }

        Paragraph::new(HELP)
            .centered()
            .dark_gray()
            .render(help_area, buf);
    }
}

impl PracticeWidget<'_> {
    fn render_items(&self, area: Rect, buf: &mut Buffer, state: &mut PracticeWidgetState) {
        if self.session.items().is_empty() {
            placeholder("No items loaded. Check the log for details.", area, buf);
            return;
        }

        if self.session.drawn().is_empty() {
            placeholder("Press n to draw questions", area, buf);
            return;
        }

        let mut y = area.y;

        for slot in 0..self.session.drawn().len() {
            let Some((drawn, item)) = self.session.drawn_item(slot) else {
                continue;
            };

            if y + ITEM_HEIGHT > area.bottom() {
                break;
            }

            let item_area = Rect::new(area.x, y, area.width, ITEM_HEIGHT);
            state.item_areas.push(item_area);
            y += ITEM_HEIGHT;

            let paragraph = Paragraph::new(format!("{}: {item}", slot + 1))
                .wrap(Wrap { trim: false })
                .centered()
                .block(Block::bordered().border_set(border::ROUNDED));

            if drawn.practiced {
                paragraph.fg(COLOR_PRACTICED)
            } else {
                paragraph
            }
            .render(item_area, buf);
        }
    }
}

fn placeholder(message: &str, area: Rect, buf: &mut Buffer) {
    let area = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    };

    Paragraph::new(message).centered().render(area, buf);
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};

    use crate::{item::PracticeItem, progress::ChartMode, session::Session, ui::Status};

    use super::{PracticeWidget, PracticeWidgetState};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn sample_session() -> Session {
        Session::new(vec![
            PracticeItem::new("Math: Algebra", 1),
            PracticeItem::new("Math: Geometry", 0),
            PracticeItem::new("Bio: Cells", 2),
        ])
    }

    #[test]
    fn renders_placeholder_before_first_draw() {
        let session = sample_session();
        let snapshot = session.summarize().expect("Unable to summarize");
        let status = Status::default();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let mut state = PracticeWidgetState::default();

        PracticeWidget::new(&session, Some(&snapshot), ChartMode::Count, &status)
            .render(area, &mut buf, &mut state);

        let text = buffer_text(&buf);
        assert!(text.contains("Press n to draw questions"));
        assert!(text.contains("To do: 1"));
        assert!(state.item_areas.is_empty());
    }

    #[test]
    fn renders_drawn_items_with_areas() {
        let rng = &mut StdRng::seed_from_u64(4);
        let mut session = sample_session();
        session.draw(2, rng).expect("Unable to draw");
        let snapshot = session.summarize().expect("Unable to summarize");
        let status = Status::default();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        let mut state = PracticeWidgetState::default();

        PracticeWidget::new(&session, Some(&snapshot), ChartMode::Percent, &status)
            .render(area, &mut buf, &mut state);

        let text = buffer_text(&buf);
        assert_eq!(state.item_areas.len(), 2);
        assert!(text.contains("Repeated"));
        assert!(text.contains("Bio: 100.0%"));
    }

    #[test]
    fn renders_empty_session() {
        let session = Session::empty();
        let snapshot = session.summarize().expect("Unable to summarize");
        let status = Status::Error("FormatError".to_owned());
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let mut state = PracticeWidgetState::default();

        PracticeWidget::new(&session, Some(&snapshot), ChartMode::Count, &status)
            .render(area, &mut buf, &mut state);

        let text = buffer_text(&buf);
        assert!(text.contains("No items loaded"));
        assert!(text.contains("FormatError"));
    }

    #[test]
    fn short_screen_records_only_visible_items() {
        let rng = &mut StdRng::seed_from_u64(4);
        let mut session = sample_session();
        session.draw(3, rng).expect("Unable to draw");
        let status = Status::default();
        let area = Rect::new(0, 0, 100, 8);
        let mut buf = Buffer::empty(area);
        let mut state = PracticeWidgetState::default();

        PracticeWidget::new(&session, None, ChartMode::Count, &status)
            .render(area, &mut buf, &mut state);

        assert_eq!(state.item_areas.len(), 1);
    }
}
