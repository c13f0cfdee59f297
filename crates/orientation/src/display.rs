//! Screen contents handed to a [`DisplayPresenter`](crate::DisplayPresenter).
//!
//! The core only decides what text goes where; fonts and pixels belong to
//! the presenter.

use core::fmt::{self, Write as _};

use heapless::{String, Vec};

use crate::machine::CalibrationSelection;
use crate::types::{Axes, Orientation};

pub const MAX_LINES: usize = 4;
pub const LINE_LEN: usize = 24;
/// Vertical distance between text rows in pixels.
pub const ROW_HEIGHT: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub const fn row(row: u8) -> Self {
        Self { x: 0, y: row * ROW_HEIGHT }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextLine {
    pub position: Position,
    pub text: String<LINE_LEN>,
    /// Drawn with inverted colors.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub lines: Vec<TextLine, MAX_LINES>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live pitch and heading, one decimal each.
    pub fn measurement(orientation: &Orientation) -> Self {
        let mut frame = Self::new();
        frame.push(
            Position::row(0),
            format_args!("Pitch:{:.1}", orientation.pitch),
        );
        frame.push(
            Position::row(1),
            format_args!("Heading:{:.1}", orientation.heading),
        );
        frame
    }

    /// Calibration type menu with the current choice highlighted.
    pub fn selection(selected: CalibrationSelection) -> Self {
        let mut frame = Self::new();
        frame.push(Position::row(0), format_args!("Select Calibration:"));
        frame.push_highlighted(
            Position::new(0, ROW_HEIGHT),
            format_args!("Level"),
            selected == CalibrationSelection::Level,
        );
        frame.push_highlighted(
            Position::new(64, ROW_HEIGHT),
            format_args!("Compass"),
            selected == CalibrationSelection::Compass,
        );
        frame
    }

    /// What the operator should do while a calibration sample is taken.
    pub fn instructions(selection: CalibrationSelection) -> Self {
        let (first, second) = match selection {
            CalibrationSelection::Level => ("Hold the device", "level and still"),
            CalibrationSelection::Compass => {
                ("Rotate the device", "about all 3 axes")
            }
        };
        let mut frame = Self::new();
        frame.push(Position::row(0), format_args!("{}", first));
        frame.push(Position::row(1), format_args!("{}", second));
        frame
    }

    /// Freshly computed offsets, three decimals each.
    pub fn offsets(offsets: &Axes) -> Self {
        let mut frame = Self::new();
        let [x, y, z] = [offsets.x, offsets.y, offsets.z].map(unsigned_zero);
        frame.push(Position::row(0), format_args!("Offset X:{:.3}", x));
        frame.push(Position::row(1), format_args!("Offset Y:{:.3}", y));
        frame.push(Position::row(2), format_args!("Offset Z:{:.3}", z));
        frame
    }

    pub fn save_failed() -> Self {
        Self::failure("Save failed")
    }

    pub fn sensor_failed() -> Self {
        Self::failure("Sensor read failed")
    }

    fn failure(reason: &str) -> Self {
        let mut frame = Self::new();
        frame.push(Position::row(0), format_args!("{}", reason));
        frame.push(Position::row(1), format_args!("Offsets unchanged"));
        frame
    }

    pub fn push(&mut self, position: Position, args: fmt::Arguments<'_>) {
        self.push_highlighted(position, args, false);
    }

    /// Appends a line. Text past [`LINE_LEN`] and lines past [`MAX_LINES`]
    /// are dropped.
    pub fn push_highlighted(
        &mut self,
        position: Position,
        args: fmt::Arguments<'_>,
        highlighted: bool,
    ) {
        let mut text = String::new();
        let _ = text.write_fmt(args);
        let _ = self.lines.push(TextLine { position, text, highlighted });
    }

    /// Line whose text equals `text`, if any.
    pub fn line(&self, text: &str) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.text.as_str() == text)
    }
}

/// Folds `-0.0` into `0.0` so it prints without a sign.
fn unsigned_zero(value: f32) -> f32 {
    value + 0.0
}
