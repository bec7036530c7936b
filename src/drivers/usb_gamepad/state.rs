use std::fmt::Display;

use bitflags::bitflags;
use packed_struct::{prelude::*, PackedStructSlice};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hid_report::{InputDataReport, REPORT_SIZE};

// Input report axis ranges
pub const JOY_AXIS_POSITIVE_MAX: f64 = 32768.0;
pub const JOY_AXIS_NEGATIVE_MAX: f64 = 32767.0;
pub const TRIGGER_MAX: f64 = 255.0;

/// Represents all possible errors decoding an input report
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated report: expected at least {expected} bytes, got {actual}")]
    TruncatedReport { expected: usize, actual: usize },
}

bitflags! {
    /// Set of digital buttons held in a single report
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Buttons: u16 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const L1 = 1 << 4;
        const R1 = 1 << 5;
        const MODE = 1 << 6;
        const START = 1 << 7;
        const SELECT = 1 << 8;
        const TURBO = 1 << 9;
        const CLEAR = 1 << 10;
    }
}

impl Buttons {
    /// Human readable names of every held button, in report order
    pub fn names(&self) -> Vec<&'static str> {
        const NAMES: [(Buttons, &str); 11] = [
            (Buttons::START, "Start"),
            (Buttons::SELECT, "Select"),
            (Buttons::L1, "L1"),
            (Buttons::R1, "R1"),
            (Buttons::MODE, "Mode"),
            (Buttons::A, "A"),
            (Buttons::B, "B"),
            (Buttons::X, "X"),
            (Buttons::Y, "Y"),
            (Buttons::TURBO, "Turbo"),
            (Buttons::CLEAR, "Clear"),
        ];
        NAMES
            .iter()
            .filter(|(button, _)| self.contains(*button))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Direction of the D-pad. Diagonals are two adjacent cardinal bits; any
/// other multi-bit combination cannot be produced by the hardware and is
/// reported as [DPad::Invalid].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DPad {
    #[default]
    Neutral,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Invalid,
}

impl DPad {
    /// Resolve a D-pad bitmask (Up=0x1, Down=0x2, Left=0x4, Right=0x8). Only
    /// the low nibble is considered.
    pub fn from_mask(mask: u8) -> Self {
        match mask & 0x0F {
            0x0 => DPad::Neutral,
            0x1 => DPad::Up,
            0x2 => DPad::Down,
            0x4 => DPad::Left,
            0x8 => DPad::Right,
            0x5 => DPad::UpLeft,
            0x9 => DPad::UpRight,
            0x6 => DPad::DownLeft,
            0xA => DPad::DownRight,
            _ => DPad::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != DPad::Invalid
    }

    pub fn is_up(&self) -> bool {
        matches!(self, DPad::Up | DPad::UpLeft | DPad::UpRight)
    }

    pub fn is_down(&self) -> bool {
        matches!(self, DPad::Down | DPad::DownLeft | DPad::DownRight)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, DPad::Left | DPad::UpLeft | DPad::DownLeft)
    }

    pub fn is_right(&self) -> bool {
        matches!(self, DPad::Right | DPad::UpRight | DPad::DownRight)
    }
}

impl Display for DPad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DPad::Neutral => "Neutral",
            DPad::Up => "Up",
            DPad::Down => "Down",
            DPad::Left => "Left",
            DPad::Right => "Right",
            DPad::UpLeft => "Up-Left",
            DPad::UpRight => "Up-Right",
            DPad::DownLeft => "Down-Left",
            DPad::DownRight => "Down-Right",
            DPad::Invalid => "Invalid",
        };
        write!(f, "{name}")
    }
}

/// Normalized position of an analog stick. Both axes are in [-1.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StickState {
    pub x: f64,
    pub y: f64,
}

/// Normalized trigger pressure in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerState {
    pub l2: f64,
    pub r2: f64,
}

/// Fully decoded state of the gamepad for a single input report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    pub left_stick: StickState,
    pub right_stick: StickState,
    pub buttons: Buttons,
    pub dpad: DPad,
    pub triggers: TriggerState,
}

impl From<&InputDataReport> for GamepadState {
    fn from(report: &InputDataReport) -> Self {
        let mut buttons = Buttons::empty();
        buttons.set(Buttons::START, report.start);
        buttons.set(Buttons::SELECT, report.select);
        buttons.set(Buttons::A, report.a);
        buttons.set(Buttons::B, report.b);
        buttons.set(Buttons::X, report.x);
        buttons.set(Buttons::Y, report.y);
        buttons.set(Buttons::L1, report.l1);
        buttons.set(Buttons::R1, report.r1);
        buttons.set(Buttons::MODE, report.mode);
        buttons.set(Buttons::TURBO, report.turbo);
        buttons.set(Buttons::CLEAR, report.clear);

        Self {
            left_stick: StickState {
                x: normalize_axis(report.l_stick_x.to_primitive()),
                y: normalize_axis(report.l_stick_y.to_primitive()),
            },
            right_stick: StickState {
                x: normalize_axis(report.r_stick_x.to_primitive()),
                y: normalize_axis(report.r_stick_y.to_primitive()),
            },
            buttons,
            dpad: DPad::from_mask(report.dpad_mask()),
            triggers: TriggerState {
                l2: normalize_trigger(report.l2),
                r2: normalize_trigger(report.r2),
            },
        }
    }
}

impl Display for GamepadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buttons = self.buttons.names();
        let buttons = if buttons.is_empty() {
            "None".to_string()
        } else {
            buttons.join(", ")
        };
        writeln!(f, "D-Pad: {}", self.dpad)?;
        writeln!(f, "Buttons pressed: {buttons}")?;
        writeln!(
            f,
            "Left Stick: X: {:6.1}% | Y: {:6.1}%",
            self.left_stick.x * 100.0,
            self.left_stick.y * 100.0
        )?;
        writeln!(
            f,
            "Right Stick: X: {:6.1}% | Y: {:6.1}%",
            self.right_stick.x * 100.0,
            self.right_stick.y * 100.0
        )?;
        writeln!(f, "L2 Trigger: {:6.1}%", self.triggers.l2 * 100.0)?;
        write!(f, "R2 Trigger: {:6.1}%", self.triggers.r2 * 100.0)
    }
}

/// Decode a raw input report into a [GamepadState]. Only the first
/// [REPORT_SIZE] bytes are read; trailing bytes are ignored.
pub fn decode(report: &[u8]) -> Result<GamepadState, DecodeError> {
    let truncated = DecodeError::TruncatedReport {
        expected: REPORT_SIZE,
        actual: report.len(),
    };
    let Some(buf) = report.get(..REPORT_SIZE) else {
        return Err(truncated);
    };

    // The layout only has fixed-width fields, so unpacking can only fail on a
    // buffer size mismatch.
    let input_report = InputDataReport::unpack_from_slice(buf).map_err(|_| truncated)?;

    Ok(GamepadState::from(&input_report))
}

/// Normalize a raw stick axis into [-1.0, 1.0].
///
/// The device reports full positive deflection as 0x8000 and full negative
/// deflection as 0x7FFF, so the deflection is the negation of the signed word
/// and spans -32767..=32768.
pub fn normalize_axis(raw: i16) -> f64 {
    let value = -(raw as i32);
    let normalized = if value >= 0 {
        value as f64 / JOY_AXIS_POSITIVE_MAX
    } else {
        value as f64 / JOY_AXIS_NEGATIVE_MAX
    };
    normalized.clamp(-1.0, 1.0)
}

/// Normalize a raw trigger value into [0.0, 1.0]
pub fn normalize_trigger(raw: u8) -> f64 {
    (raw as f64 / TRIGGER_MAX).clamp(0.0, 1.0)
}
