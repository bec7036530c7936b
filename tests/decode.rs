use std::error::Error;

use padreader::capture::read_capture;
use padreader::cli::output::format_state;
use padreader::config::{Config, OutputFormat};
use padreader::drivers::usb_gamepad::{
    decode,
    driver::Driver,
    event::{BinaryInput, ButtonEvent, DPadEvent, Event},
    state::{Buttons, DPad},
    DecodeError,
};

const RECORDING: &str = "\
E: 000000.000000 20 00 14 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
E: 000001.203118 20 00 14 00 10 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
E: 000001.519834 20 00 14 00 30 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
E: 000007.210987 20 00 14 09 30 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
E: 000008.000000 3 00 14 09
";

#[tokio::test]
async fn test_replay_recording() -> Result<(), Box<dyn Error>> {
    let entries = read_capture(RECORDING.as_bytes()).await?;
    assert_eq!(entries.len(), 5);

    let mut driver = Driver::new();
    let mut events = Vec::new();
    for entry in entries.iter().take(4) {
        events.extend(driver.handle_input_report(&entry.data)?);
    }
    assert_eq!(
        events,
        vec![
            Event::Button(ButtonEvent::A(BinaryInput { pressed: true })),
            Event::Button(ButtonEvent::B(BinaryInput { pressed: true })),
            Event::DPad(DPadEvent {
                direction: DPad::UpRight
            }),
        ]
    );

    let state = driver.state().expect("should have state");
    assert_eq!(state.buttons, Buttons::A | Buttons::B);
    assert_eq!(state.dpad, DPad::UpRight);

    // The last entry is too short to be decoded
    assert_eq!(
        decode(&entries[4].data),
        Err(DecodeError::TruncatedReport {
            expected: 16,
            actual: 3
        })
    );

    Ok(())
}

#[test]
fn test_decode_concurrently() {
    let mut buf = [0u8; 16];
    buf[2] = 0x06;
    buf[3] = 0x80;
    buf[6] = 0x7f;
    buf[7] = 0xff;
    let expected = decode(&buf).expect("should decode");

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || decode(&buf)))
        .collect();
    for handle in handles {
        let state = handle
            .join()
            .expect("thread should not panic")
            .expect("should decode");
        assert_eq!(state, expected);
    }
    assert_eq!(expected.dpad, DPad::DownLeft);
    assert_eq!(expected.buttons, Buttons::Y);
    assert_eq!(expected.left_stick.x, -1.0);
}

#[tokio::test]
async fn test_json_output() -> Result<(), Box<dyn Error>> {
    let mut buf = [0u8; 16];
    buf[2] = 0x01;
    buf[3] = 0x10;
    buf[4] = 0xff;
    let state = decode(&buf)?;
    let config = Config {
        format: OutputFormat::Json,
        raw: true,
        ..Default::default()
    };

    let text = format_state(&config, Some(1.5), &buf, &state)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(value["timestamp"], 1.5);
    assert_eq!(value["raw"], "00 00 01 10 ff 00 00 00 00 00 00 00 00 00 00 00");
    assert_eq!(value["state"]["dpad"], "up");
    assert_eq!(value["state"]["triggers"]["l2"], 1.0);
    assert_eq!(value["state"]["left_stick"]["x"], 0.0);

    Ok(())
}
