/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Statequiz.
 *
 * Statequiz is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Statequiz is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Statequiz.  If not, see <http://www.gnu.org/licenses/>.
 */

use ratatui::style::Color as RatColor;

use crate::report::Tone;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const GREEN: Color = Color::new(0x4A, 0xDE, 0x80);
    pub const RED: Color = Color::new(0xF9, 0x73, 0x73);
    pub const BLUE: Color = Color::new(0x60, 0xA5, 0xFA);
    pub const ORANGE: Color = Color::new(0xF9, 0x73, 0x16);
    pub const YELLOW: Color = Color::new(0xFA, 0xCC, 0x15);
    pub const LIGHT_GRAY: Color = Color::new(0xE5, 0xE7, 0xEB);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn blend_with(self, other: Color, pct_other: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&pct_other),
            "Value must be in the range [0, 1]"
        );
        let pct_self = 1.0 - pct_other;
        Self::new(
            ((self.r as f64 * pct_self) + (other.r as f64 * pct_other)) as u8,
            ((self.g as f64 * pct_self) + (other.g as f64 * pct_other)) as u8,
            ((self.b as f64 * pct_self) + (other.b as f64 * pct_other)) as u8,
        )
    }
}

impl From<Color> for RatColor {
    fn from(value: Color) -> Self {
        RatColor::Rgb(value.r, value.g, value.b)
    }
}

impl From<Tone> for Color {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Default => Color::LIGHT_GRAY,
            Tone::Correct => Color::GREEN,
            Tone::Incorrect => Color::RED,
            Tone::NoAnswer => Color::BLUE,
            Tone::Skipped => Color::ORANGE,
        }
    }
}

impl From<Tone> for RatColor {
    fn from(tone: Tone) -> Self {
        Color::from(tone).into()
    }
}

#[repr(transparent)]
pub struct LinearGradient {
    colors: Vec<Color>,
}

impl LinearGradient {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let colors = colors.into_iter().collect::<Vec<_>>();
        assert!(!colors.is_empty(), "Gradient needs at least one color");

        Self { colors }
    }

    /// Red at 0, through yellow, to green at 1. Used to colour scores.
    pub fn score() -> Self {
        Self::new([Color::RED, Color::YELLOW, Color::GREEN])
    }

    pub fn sample(&self, progress: f64) -> Color {
        if progress >= 1.0 || self.colors.len() == 1 {
            return *self.colors.last().expect("No last color");
        }

        let progress = progress.max(0.0);
        let scaled = (self.colors.len() - 1) as f64 * progress;
        let floor = scaled.floor();

        let left = floor as usize;
        let right = left + 1;

        debug_assert!(
            right < self.colors.len(),
            "{} greater than {}: calculated from ({} * {}).floor() = {}",
            right,
            self.colors.len(),
            self.colors.len(),
            progress,
            left
        );

        self.colors[left].blend_with(self.colors[right], scaled - floor)
    }
}
