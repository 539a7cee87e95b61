use std::time::Duration;

use super::frame::{Frame, FRAME_LEN};

/// The pulse alphabet of the protocol. Every transmission is built from
/// these seven durations and nothing else.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PulseType {
    HeaderMark,
    HeaderSpace,
    BitMark,
    OneSpace,
    ZeroSpace,
    RepeatMark,
    RepeatSpace,
}

impl PulseType {
    pub fn duration(self) -> Duration {
        Duration::from_micros(match self {
            PulseType::HeaderMark => 3400,
            PulseType::HeaderSpace => 1750,
            PulseType::BitMark => 450,
            PulseType::OneSpace => 1300,
            PulseType::ZeroSpace => 420,
            PulseType::RepeatMark => 440,
            PulseType::RepeatSpace => 17100,
        })
    }
}

/// Encode a frame into the full pulse sequence: the frame is sent twice
/// with a repeat mark/space pair between the two copies.
pub fn encode_pulses(frame: &Frame) -> Vec<PulseType> {
    let mut pulses = Vec::with_capacity(2 * (2 + 16 * FRAME_LEN) + 2);

    append_frame(frame, &mut pulses);
    pulses.push(PulseType::RepeatMark);
    pulses.push(PulseType::RepeatSpace);
    append_frame(frame, &mut pulses);

    pulses
}

/// Header pair followed by the frame bytes, most significant bit first.
/// Each bit contributes a mark and a space.
fn append_frame(frame: &Frame, pulses: &mut Vec<PulseType>) {
    pulses.push(PulseType::HeaderMark);
    pulses.push(PulseType::HeaderSpace);

    for &byte in frame.as_bytes() {
        for bit in (0..8).rev() {
            pulses.push(PulseType::BitMark);
            pulses.push(if byte & (1 << bit) != 0 {
                PulseType::OneSpace
            } else {
                PulseType::ZeroSpace
            });
        }
    }
}

pub fn encode(frame: &Frame) -> Vec<Duration> {
    encode_pulses(frame)
        .into_iter()
        .map(PulseType::duration)
        .collect()
}
