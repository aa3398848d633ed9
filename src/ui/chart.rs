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

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Paragraph, Widget, Wrap,
    },
};

use crate::{
    color::{slice_colors, Color},
    progress::{ChartMode, ProgressSnapshot},
};

const INNER_RADIUS: f64 = 0.55;
const OUTER_RADIUS: f64 = 1.0;
const RADIAL_STEPS: usize = 24;
const ANGULAR_STEPS: usize = 360;

///Doughnut of the snapshot values, starting at twelve o'clock and running
///clockwise, with a legend underneath.
pub(super) struct DoughnutWidget<'a> {
    snapshot: &'a ProgressSnapshot,
    mode: ChartMode,
}

impl<'a> DoughnutWidget<'a> {
    pub fn new(snapshot: &'a ProgressSnapshot, mode: ChartMode) -> Self {
        Self { snapshot, mode }
    }
}

///Which slice `fraction` (0 at the start of the ring, 1 at the end) falls in.
///`None` when every value is zero.
pub(super) fn slice_at(values: &[f64], fraction: f64) -> Option<usize> {
    let total: f64 = values.iter().sum();

    if total <= 0.0 {
        return None;
    }

    let needle = fraction * total;
    let mut running_total = 0.0;

    for (i, value) in values.iter().enumerate() {
        running_total += value;
        if needle < running_total {
            return Some(i);
        }
    }

    //Rounding can leave the final needle just past the last slice
    values.iter().rposition(|value| *value > 0.0)
}

///Ring points grouped per slice. Points of an all-zero chart are returned as
///a separate ring so an empty catalog still draws an outline.
pub(super) fn ring_points(values: &[f64]) -> (Vec<Vec<(f64, f64)>>, Vec<(f64, f64)>) {
    let mut slices = vec![vec![]; values.len()];
    let mut empty = vec![];

    for a in 0..ANGULAR_STEPS {
        let fraction = a as f64 / ANGULAR_STEPS as f64;
        let angle = fraction * TAU;
        let slice = slice_at(values, fraction);

        for r in 0..=RADIAL_STEPS {
            let radius =
                INNER_RADIUS + (OUTER_RADIUS - INNER_RADIUS) * (r as f64 / RADIAL_STEPS as f64);
            let point = (radius * angle.sin(), radius * angle.cos());

            match slice {
                Some(slice) => slices[slice].push(point),
                None => empty.push(point),
            }
        }
    }

    (slices, empty)
}

fn square_area(area: Rect) -> Rect {
    //Cells are about twice as tall as they are wide
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).max(1).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl DoughnutWidget<'_> {
    fn format_value(&self, value: f64) -> String {
        match self.mode {
            ChartMode::Count => format!("{value:.0}"),
            ChartMode::Percent => format!("{value:.1}%"),
        }
    }
}

impl Widget for DoughnutWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let values = self.snapshot.values_for(self.mode);
        let colors = slice_colors(self.snapshot.subjects.len());

        let (chart_area, legend_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Min(3),
                    Constraint::Length(values.len() as u16 + 2),
                ],
            );
            let split = layout.split(area);
            (split[0], split[1])
        };

        let (slices, empty) =
            ring_points(&values.iter().map(|(_, value)| *value).collect::<Vec<_>>());

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-OUTER_RADIUS, OUTER_RADIUS])
            .y_bounds([-OUTER_RADIUS, OUTER_RADIUS])
            .paint(|ctx| {
                for (coords, color) in slices.iter().zip(colors.iter()) {
                    ctx.draw(&Points {
                        coords,
                        color: (*color).into(),
                    });
                }
                ctx.draw(&Points {
                    coords: &empty,
                    color: ratatui::style::Color::DarkGray,
                });
            })
            .render(square_area(chart_area), buf);

        let legend = values
            .iter()
            .zip(colors.iter().copied().chain(std::iter::repeat(Color::WHITE)))
            .map(|((label, value), color)| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(color.into())),
                    Span::raw(format!("{label}: {}", self.format_value(*value))),
                ])
            })
            .collect::<Vec<_>>();

        Paragraph::new(legend)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Progress".bold()))
            .render(legend_area, buf);
    }
}
