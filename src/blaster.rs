use std::io;
use std::time::Duration;

/**
 * Implements the chunked payload format sent to the IR blaster: records of
 * up to 16 pulse durations, each record prefixed with a length byte, each
 * duration split into little-endian low/high bytes, the whole blob
 * rendered as base64.
 */
use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

// Durations per length-prefixed record
const CHUNK_PULSES: usize = 16;

/// Length byte for a record carrying `count` durations. A single formula
/// covers both record kinds: a full record of 16 durations gets the 0x1f
/// sentinel, a partial record gets its payload byte count minus one.
fn length_byte(count: usize) -> u8 {
    debug_assert!((1..=CHUNK_PULSES).contains(&count));
    ((count * 2 - 1) & 0x1f) as u8
}

/// One IR transmission as the blaster consumes it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transmission {
    // On-off pulse durations
    pub pulses: Vec<Duration>,
}

#[derive(Error, Debug, Copy, Clone)]
pub enum ParseError {
    #[error("length byte {0:#04x} implies an odd payload size")]
    InvalidLengthByte(u8),

    #[error("truncated record: expected {expected} payload bytes, found {found}")]
    TruncatedRecord { expected: usize, found: usize },
}

impl Transmission {
    pub fn new(pulses: Vec<Duration>) -> Self {
        Self { pulses }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut b = BytesMut::new();

        for chunk in self.pulses.chunks(CHUNK_PULSES) {
            b.put_u8(length_byte(chunk.len()));
            for pulse in chunk {
                // Durations come from the pulse alphabet and always fit in
                // 16 bits, anything larger saturates.
                let micros = u16::try_from(pulse.as_micros()).unwrap_or(u16::MAX);
                b.put_u16_le(micros);
            }
        }

        b.freeze()
    }

    pub fn from_bytes(buf: Bytes) -> Result<Self, ParseError> {
        let mut buf = buf;
        let mut pulses = Vec::new();

        while buf.has_remaining() {
            let len = buf.get_u8();
            let payload = len as usize + 1;
            if payload % 2 != 0 {
                return Err(ParseError::InvalidLengthByte(len));
            }
            if buf.remaining() < payload {
                return Err(ParseError::TruncatedRecord {
                    expected: payload,
                    found: buf.remaining(),
                });
            }

            for _ in 0..payload / 2 {
                pulses.push(Duration::from_micros(buf.get_u16_le() as u64));
            }
        }

        Ok(Self { pulses })
    }

    pub fn to_base64(&self) -> String {
        base64::encode(self.to_bytes())
    }

    pub fn to_raw_format(&self) -> String {
        use std::fmt::Write;

        let mut sign = false;
        let mut out = String::new();
        self.pulses.iter().for_each(|p| {
            sign = !sign;
            if sign {
                write!(out, "+").unwrap();
            } else {
                write!(out, "-").unwrap();
            }
            write!(out, "{} ", p.as_micros()).unwrap();
        });
        out
    }

    /// Write each record as one line of comma-separated hex: the length
    /// byte followed by the low/high byte pairs of its durations.
    pub fn dump_chunks(&self, w: &mut dyn io::Write) -> io::Result<()> {
        for chunk in self.pulses.chunks(CHUNK_PULSES) {
            let mut record = vec![length_byte(chunk.len())];
            for pulse in chunk {
                let micros = u16::try_from(pulse.as_micros()).unwrap_or(u16::MAX);
                record.extend_from_slice(&micros.to_le_bytes());
            }

            let line = record
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(w, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mitsubishi::{phy, ClimateCommand, Frame};

    fn default_transmission() -> Transmission {
        let frame = Frame::try_from(&ClimateCommand::default()).unwrap();
        Transmission::new(phy::encode(&frame))
    }

    #[test]
    fn test_length_byte() {
        // The full-record sentinel falls out of the shared formula
        assert_eq!(length_byte(16), 31);
        assert_eq!(length_byte(8), 15);
        assert_eq!(length_byte(6), 11);
        assert_eq!(length_byte(1), 1);
    }

    #[test]
    fn test_pack_layout() {
        let transmission = default_transmission();
        assert_eq!(transmission.pulses.len(), 582);

        let bytes = transmission.to_bytes();
        // 36 full records of 33 bytes, one final record of 6 durations
        assert_eq!(bytes.len(), 36 * 33 + 13);
        assert_eq!(bytes[0], 31);
        assert_eq!(bytes[36 * 33], 11);

        // First record starts with the header pair, little endian:
        // 3400 = 0x0d48, 1750 = 0x06d6
        assert_eq!(hex::encode(&bytes[..5]), "1f480dd606");
    }

    #[test]
    fn test_round_trip() {
        let transmission = default_transmission();
        let decoded = Transmission::from_bytes(transmission.to_bytes()).unwrap();
        assert_eq!(decoded, transmission);
    }

    #[test]
    fn test_partial_record() {
        let pulses = [450, 1300, 450, 420, 450].map(Duration::from_micros);
        let transmission = Transmission::new(pulses.to_vec());

        let bytes = transmission.to_bytes();
        assert_eq!(bytes.len(), 11);
        assert_eq!(bytes[0], 9);

        let decoded = Transmission::from_bytes(bytes).unwrap();
        assert_eq!(decoded, transmission);
    }

    #[test]
    fn test_base64() {
        let transmission = Transmission::new(vec![Duration::from_micros(450)]);
        // [0x01, 0xc2, 0x01]
        assert_eq!(transmission.to_base64(), "AcIB");
    }

    #[test]
    fn test_parse_errors() {
        // Length byte announcing an odd payload
        assert!(matches!(
            Transmission::from_bytes(Bytes::from_static(&[0x02, 0x00, 0x00])),
            Err(ParseError::InvalidLengthByte(0x02))
        ));

        // Record cut short
        assert!(matches!(
            Transmission::from_bytes(Bytes::from_static(&[0x03, 0xc2, 0x01])),
            Err(ParseError::TruncatedRecord {
                expected: 4,
                found: 2
            })
        ));
    }

    #[test]
    fn test_dump_chunks() {
        let transmission = default_transmission();
        let mut out = Vec::new();
        transmission.dump_chunks(&mut out).unwrap();

        let dump = String::from_utf8(out).unwrap();
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), 37);
        assert!(lines[0].starts_with("1f,48,0d,d6,06,"));
        assert!(lines[36].starts_with("0b,"));
    }

    #[test]
    fn test_raw_format() {
        let pulses = [3400, 1750, 450, 420].map(Duration::from_micros);
        let transmission = Transmission::new(pulses.to_vec());
        assert_eq!(transmission.to_raw_format(), "+3400 -1750 +450 -420 ");
    }

    #[test]
    fn test_deterministic() {
        let a = default_transmission();
        let b = default_transmission();
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.to_base64(), b.to_base64());
    }
}
