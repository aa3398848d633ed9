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

use ratatui::style::Color as RatColor;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const PINK: Color = Color::new(0xFF, 0x63, 0x84);
    pub const BLUE: Color = Color::new(0x36, 0xA2, 0xEB);
    pub const YELLOW: Color = Color::new(0xFF, 0xCE, 0x56);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    ///`pct_other` is clamped to [0, 1].
    pub fn blend_with(self, other: Color, pct_other: f64) -> Self {
        let pct_other = pct_other.clamp(0.0, 1.0);
        let pct_self = 1.0 - pct_other;
        let mix = |a: u8, b: u8| ((a as f64 * pct_self) + (b as f64 * pct_other)).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<Color> for RatColor {
    fn from(value: Color) -> Self {
        RatColor::Rgb(value.r, value.g, value.b)
    }
}

pub(crate) struct LinearGradient {
    colors: Vec<Color>,
}

const SUBJECTS: [Color; 3] = [Color::PINK, Color::BLUE, Color::YELLOW];

impl LinearGradient {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
        }
    }

    pub fn subjects() -> Self {
        Self::new(SUBJECTS)
    }

    pub fn sample(&self, progress: f64) -> Color {
        match self.colors.len() {
            0 => Color::WHITE,
            1 => self.colors[0],
            len => {
                if progress >= 1.0 {
                    return self.colors[len - 1];
                }

                let scaled = (len - 1) as f64 * progress.max(0.0);
                let floor = scaled.floor();
                let left = floor as usize;

                self.colors[left].blend_with(self.colors[left + 1], scaled - floor)
            }
        }
    }

    ///Spreads `count` slice colors evenly over the gradient.
    pub fn spread(&self, count: usize) -> Vec<Color> {
        match count {
            0 => vec![],
            1 => vec![self.sample(0.0)],
            _ => (0..count)
                .map(|i| self.sample(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

///One color per subject followed by white for the remaining bucket.
pub(crate) fn slice_colors(subject_count: usize) -> Vec<Color> {
    let mut colors = LinearGradient::subjects().spread(subject_count);
    colors.push(Color::WHITE);
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_subjects_match_palette() {
        assert_eq!(
            slice_colors(3),
            vec![Color::PINK, Color::BLUE, Color::YELLOW, Color::WHITE]
        );
    }

    #[test]
    fn blend_midpoint() {
        let gradient = LinearGradient::new([Color::new(0, 0, 0), Color::new(200, 100, 50)]);
        assert_eq!(gradient.sample(0.5), Color::new(100, 50, 25));
        assert_eq!(gradient.sample(1.5), Color::new(200, 100, 50));
    }

    #[test]
    fn no_subjects_only_remaining() {
        assert_eq!(slice_colors(0), vec![Color::WHITE]);
        assert_eq!(slice_colors(1), vec![Color::PINK, Color::WHITE]);
    }
}
