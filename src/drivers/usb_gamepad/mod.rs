pub mod driver;
pub mod event;
pub mod hid_report;
pub mod state;

pub use state::{decode, DecodeError, GamepadState};
