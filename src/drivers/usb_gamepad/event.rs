use std::fmt::Display;

use serde::Serialize;

use super::state::DPad;

/// Events that can be emitted by the gamepad
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Button(ButtonEvent),
    #[serde(rename = "dpad")]
    DPad(DPadEvent),
    Axis(AxisEvent),
    Trigger(TriggerEvent),
}

/// Binary input contain either pressed or unpressed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinaryInput {
    pub pressed: bool,
}

/// Axis input contain normalized (x, y) coordinates
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JoyAxisInput {
    pub x: f64,
    pub y: f64,
}

/// Trigger input contains normalized pressure
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriggerInput {
    pub value: f64,
}

/// Button events represent binary inputs
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ButtonEvent {
    A(BinaryInput),
    B(BinaryInput),
    X(BinaryInput),
    Y(BinaryInput),
    /// Left shoulder button
    L1(BinaryInput),
    /// Right shoulder button
    R1(BinaryInput),
    Mode(BinaryInput),
    Start(BinaryInput),
    Select(BinaryInput),
    Turbo(BinaryInput),
    Clear(BinaryInput),
}

/// Emitted whenever the resolved D-pad direction changes
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DPadEvent {
    pub direction: DPad,
}

/// Axis events are events that have (x, y) values
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum AxisEvent {
    LStick(JoyAxisInput),
    RStick(JoyAxisInput),
}

/// Trigger events contain values indicating how far a trigger is pulled
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TriggerEvent {
    L2(TriggerInput),
    R2(TriggerInput),
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Button(event) => write!(f, "{event}"),
            Event::DPad(event) => write!(f, "D-Pad: {}", event.direction),
            Event::Axis(AxisEvent::LStick(input)) => write!(
                f,
                "Left Stick: X: {:6.1}% | Y: {:6.1}%",
                input.x * 100.0,
                input.y * 100.0
            ),
            Event::Axis(AxisEvent::RStick(input)) => write!(
                f,
                "Right Stick: X: {:6.1}% | Y: {:6.1}%",
                input.x * 100.0,
                input.y * 100.0
            ),
            Event::Trigger(TriggerEvent::L2(input)) => write!(f, "L2: {:.1}%", input.value * 100.0),
            Event::Trigger(TriggerEvent::R2(input)) => write!(f, "R2: {:.1}%", input.value * 100.0),
        }
    }
}

impl Display for ButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, input) = match self {
            ButtonEvent::A(input) => ("A", input),
            ButtonEvent::B(input) => ("B", input),
            ButtonEvent::X(input) => ("X", input),
            ButtonEvent::Y(input) => ("Y", input),
            ButtonEvent::L1(input) => ("L1", input),
            ButtonEvent::R1(input) => ("R1", input),
            ButtonEvent::Mode(input) => ("Mode", input),
            ButtonEvent::Start(input) => ("Start", input),
            ButtonEvent::Select(input) => ("Select", input),
            ButtonEvent::Turbo(input) => ("Turbo", input),
            ButtonEvent::Clear(input) => ("Clear", input),
        };
        let action = if input.pressed { "pressed" } else { "released" };
        write!(f, "{name} {action}")
    }
}
