use super::{ClimateCommand, FanSpeed, Mode, Schedule};
use thiserror::Error;

pub const FRAME_LEN: usize = 18;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("temperature out of range, must be between 16C and 31C, got {0}")]
    TemperatureOutOfRange(u8),

    #[error("fan level out of range, must be between 0 and 15, got {0}")]
    FanLevelOutOfRange(u8),
}

/// One complete command frame: five fixed protocol bytes, the encoded
/// command fields, three reserved zero bytes and a trailing checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    const PREFIX: [u8; 5] = [0x23, 0xCB, 0x26, 0x01, 0x00];

    const POWER_ON: u8 = 0x20;

    const FAN_AUTO: u8 = 0x80;
    const FAN_VANE_AUTO: u8 = 0x40;
    const FAN_VANE_MOVE: u8 = 0x78;
    const FAN_LEVEL_MAX: u8 = 15;

    const TEMP_MIN: u8 = 16;
    const TEMP_MAX: u8 = 31;

    const SCHEDULE_START: u8 = 0x05;
    const SCHEDULE_END: u8 = 0x03;
    const SCHEDULE_START_END: u8 = 0x07;

    fn new() -> Self {
        let mut data = [0u8; FRAME_LEN];
        data[..5].copy_from_slice(&Self::PREFIX);
        Frame(data)
    }

    fn set_power(&mut self, on: bool) {
        self.0[5] = if on { Self::POWER_ON } else { 0x00 };
    }

    // Modes are spread over two bytes, the second one also varies
    fn set_mode(&mut self, mode: Mode) {
        let (mode_byte, group_byte) = match mode {
            Mode::Heat => (0x08, 0x30),
            Mode::Dry => (0x10, 0x32),
            Mode::Cold => (0x18, 0x36),
            Mode::Auto => (0x20, 0x30),
        };
        self.0[6] = mode_byte;
        self.0[8] = group_byte;
    }

    fn set_temperature(&mut self, celsius: u8) -> Result<(), EncodeError> {
        if !(Self::TEMP_MIN..=Self::TEMP_MAX).contains(&celsius) {
            return Err(EncodeError::TemperatureOutOfRange(celsius));
        }
        self.0[7] = celsius - Self::TEMP_MIN;
        Ok(())
    }

    fn set_fan(&mut self, fan: FanSpeed) -> Result<(), EncodeError> {
        self.0[9] = match fan {
            FanSpeed::Auto => Self::FAN_AUTO,
            FanSpeed::Set(level) => {
                if level > Self::FAN_LEVEL_MAX {
                    return Err(EncodeError::FanLevelOutOfRange(level));
                }
                (level << 3) & 0x7f
            }
            FanSpeed::VaneAuto => Self::FAN_VANE_AUTO,
            FanSpeed::VaneMove => Self::FAN_VANE_MOVE,
        };
        Ok(())
    }

    fn set_clocks(&mut self, command: &ClimateCommand) {
        self.0[10] = command.clock.quarter_ticks();
        self.0[11] = command.end_time.quarter_ticks();
        self.0[12] = command.start_time.quarter_ticks();
    }

    fn set_schedule(&mut self, schedule: Schedule) {
        self.0[13] = match schedule {
            Schedule::Start => Self::SCHEDULE_START,
            Schedule::End => Self::SCHEDULE_END,
            Schedule::StartEnd => Self::SCHEDULE_START_END,
            Schedule::Off => 0x00,
        };
    }

    fn compute_checksum(&self) -> u8 {
        self.0[..FRAME_LEN - 1]
            .iter()
            .fold(0u8, |sum, &b| sum.wrapping_add(b))
    }

    fn apply_checksum(&mut self) {
        self.0[FRAME_LEN - 1] = self.compute_checksum();
    }

    pub fn validate_checksum(&self) -> bool {
        self.compute_checksum() == self.0[FRAME_LEN - 1]
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Comma-separated two-digit hex, one entry per frame byte.
    pub fn to_hex_line(&self) -> String {
        self.0
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl TryFrom<&ClimateCommand> for Frame {
    type Error = EncodeError;

    fn try_from(command: &ClimateCommand) -> Result<Self, EncodeError> {
        let mut frame = Frame::new();
        frame.set_power(command.power);
        frame.set_mode(command.mode);
        frame.set_temperature(command.temperature)?;
        frame.set_fan(command.fan)?;
        frame.set_clocks(command);
        frame.set_schedule(command.schedule);
        frame.apply_checksum();
        Ok(frame)
    }
}
