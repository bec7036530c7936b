use packed_struct::prelude::*;

/// Minimum number of bytes needed to decode an input report
pub const REPORT_SIZE: usize = 16;

// Input report
//
// Synthetic samples in hid-recorder format, built from the layout below
// rather than recorded from hardware. Bytes are listed after the length.
//
// No input
// E: 000000.000000 20 00 14 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
//
// Buttons
// A
// E: 000001.203118 20 00 14 00 10 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// A + B
// E: 000001.519834 20 00 14 00 30 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// L1
// E: 000002.811204 20 00 14 00 01 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// Mode
// E: 000003.330921 20 00 14 00 04 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// Start
// E: 000004.109772 20 00 14 10 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// Select
// E: 000004.702340 20 00 14 20 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// Turbo
// E: 000005.441017 20 00 14 00 00 00 00 00 00 00 00 00 00 00 00 20 00 00 00 00 00
// Clear
// E: 000005.968512 20 00 14 00 00 00 00 00 00 00 00 00 00 00 00 40 00 00 00 00 00
//
// D-Pad
// Up
// E: 000007.004411 20 00 14 01 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// Up + Right
// E: 000007.210987 20 00 14 09 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// Down + Left
// E: 000007.652231 20 00 14 06 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
//
// Axes
// TRIGGER_LEFT (full)
// E: 000009.118830 20 00 14 00 00 ff 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00
// LEFTSTICK_RIGHT (full)
// E: 000010.450012 20 00 14 00 00 00 00 80 00 00 00 00 00 00 00 00 00 00 00 00 00
// LEFTSTICK_LEFT (full)
// E: 000010.977341 20 00 14 00 00 00 00 7f ff 00 00 00 00 00 00 00 00 00 00 00 00

/// Input data report. Multi-byte axis values are big-endian and the D-pad
/// occupies the low nibble of byte 2.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "16")]
pub struct InputDataReport {
    // BYTE 0
    #[packed_field(bytes = "0")]
    pub header: u8,
    // BYTE 1
    #[packed_field(bytes = "1")]
    pub length: u8,

    // BYTE 2
    #[packed_field(bits = "18")]
    pub select: bool,
    #[packed_field(bits = "19")]
    pub start: bool,
    #[packed_field(bits = "20")]
    pub right: bool,
    #[packed_field(bits = "21")]
    pub left: bool,
    #[packed_field(bits = "22")]
    pub down: bool,
    #[packed_field(bits = "23")]
    pub up: bool,

    // BYTE 3
    #[packed_field(bits = "24")]
    pub y: bool,
    #[packed_field(bits = "25")]
    pub x: bool,
    #[packed_field(bits = "26")]
    pub b: bool,
    #[packed_field(bits = "27")]
    pub a: bool,
    #[packed_field(bits = "29")]
    pub mode: bool,
    #[packed_field(bits = "30")]
    pub r1: bool,
    #[packed_field(bits = "31")]
    pub l1: bool,

    // BYTES 4-5
    #[packed_field(bytes = "4")]
    pub l2: u8,
    #[packed_field(bytes = "5")]
    pub r2: u8,

    // Axes
    // BYTES 6-7
    #[packed_field(bytes = "6..=7", endian = "msb")]
    pub l_stick_x: Integer<i16, packed_bits::Bits<16>>,
    // BYTES 8-9
    #[packed_field(bytes = "8..=9", endian = "msb")]
    pub l_stick_y: Integer<i16, packed_bits::Bits<16>>,
    // BYTES 10-11
    #[packed_field(bytes = "10..=11", endian = "msb")]
    pub r_stick_x: Integer<i16, packed_bits::Bits<16>>,
    // BYTES 12-13
    #[packed_field(bytes = "12..=13", endian = "msb")]
    pub r_stick_y: Integer<i16, packed_bits::Bits<16>>,

    // BYTE 14
    #[packed_field(bits = "113")]
    pub clear: bool,
    #[packed_field(bits = "114")]
    pub turbo: bool,

    // BYTE 15
    #[packed_field(bytes = "15")]
    pub reserved: u8,
}

impl InputDataReport {
    /// Returns the raw D-pad bitmask (Up=0x1, Down=0x2, Left=0x4, Right=0x8)
    pub fn dpad_mask(&self) -> u8 {
        let mut mask = 0;
        if self.up {
            mask |= 0x1;
        }
        if self.down {
            mask |= 0x2;
        }
        if self.left {
            mask |= 0x4;
        }
        if self.right {
            mask |= 0x8;
        }
        mask
    }
}
