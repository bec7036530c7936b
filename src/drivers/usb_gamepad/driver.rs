use super::{
    event::{
        AxisEvent, BinaryInput, ButtonEvent, DPadEvent, Event, JoyAxisInput, TriggerEvent,
        TriggerInput,
    },
    state::{decode, Buttons, DecodeError, GamepadState},
};

/// Button flags paired with the event variant they emit
const BUTTON_EVENTS: [(Buttons, fn(BinaryInput) -> ButtonEvent); 11] = [
    (Buttons::A, ButtonEvent::A),
    (Buttons::B, ButtonEvent::B),
    (Buttons::X, ButtonEvent::X),
    (Buttons::Y, ButtonEvent::Y),
    (Buttons::L1, ButtonEvent::L1),
    (Buttons::R1, ButtonEvent::R1),
    (Buttons::MODE, ButtonEvent::Mode),
    (Buttons::START, ButtonEvent::Start),
    (Buttons::SELECT, ButtonEvent::Select),
    (Buttons::TURBO, ButtonEvent::Turbo),
    (Buttons::CLEAR, ButtonEvent::Clear),
];

/// Turns a stream of input reports into state change events. Buffers are
/// supplied by the caller; the driver never touches the device itself.
#[derive(Debug, Default)]
pub struct Driver {
    /// State for the device
    state: Option<GamepadState>,
}

impl Driver {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Returns the most recently decoded state
    pub fn state(&self) -> Option<&GamepadState> {
        self.state.as_ref()
    }

    /// Decodes the buffer into a [GamepadState], updates the internal state
    /// and returns the events that changed since the last report.
    pub fn handle_input_report(&mut self, buf: &[u8]) -> Result<Vec<Event>, DecodeError> {
        let input_state = decode(buf)?;

        // Print input state for debugging
        log::trace!("--- Input state ---");
        log::trace!("{input_state}");
        log::trace!("---- End State ----");

        if !input_state.dpad.is_valid() {
            log::warn!("Got impossible D-pad combination: {:#04x}", buf[2] & 0x0F);
        }

        // Update the state
        let old_state = self.update_state(input_state);

        // Translate the state into a stream of input events
        let events = self.translate_events(old_state);

        Ok(events)
    }

    /// Update internal state
    fn update_state(&mut self, input_state: GamepadState) -> Option<GamepadState> {
        let old_state = self.state;
        self.state = Some(input_state);
        old_state
    }

    /// Translate the state into individual events
    fn translate_events(&self, old_state: Option<GamepadState>) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(state) = self.state else {
            return events;
        };
        let Some(old_state) = old_state else {
            return events;
        };

        // Binary events
        let changed = state.buttons.symmetric_difference(old_state.buttons);
        for (flag, to_event) in BUTTON_EVENTS {
            if !changed.contains(flag) {
                continue;
            }
            events.push(Event::Button(to_event(BinaryInput {
                pressed: state.buttons.contains(flag),
            })));
        }

        if state.dpad != old_state.dpad {
            events.push(Event::DPad(DPadEvent {
                direction: state.dpad,
            }));
        }

        // Axis events
        if state.left_stick != old_state.left_stick {
            events.push(Event::Axis(AxisEvent::LStick(JoyAxisInput {
                x: state.left_stick.x,
                y: state.left_stick.y,
            })));
        }
        if state.right_stick != old_state.right_stick {
            events.push(Event::Axis(AxisEvent::RStick(JoyAxisInput {
                x: state.right_stick.x,
                y: state.right_stick.y,
            })));
        }

        if state.triggers.l2 != old_state.triggers.l2 {
            events.push(Event::Trigger(TriggerEvent::L2(TriggerInput {
                value: state.triggers.l2,
            })));
        }
        if state.triggers.r2 != old_state.triggers.r2 {
            events.push(Event::Trigger(TriggerEvent::R2(TriggerInput {
                value: state.triggers.r2,
            })));
        }
        log::trace!("Got events: {events:?}");

        events
    }
}
