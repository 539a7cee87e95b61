pub mod frame;
pub mod phy;
pub use frame::{EncodeError, Frame};

use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

// The complete state sent to the air conditioner
#[derive(Debug, Clone)]
pub struct ClimateCommand {
    // Power state
    pub power: bool,

    pub mode: Mode,

    // Target temperature in Celsius, 16 to 31
    pub temperature: u8,

    // Fan speed setting
    pub fan: FanSpeed,

    // Current time of day
    pub clock: ClockTime,

    // Program end time
    pub end_time: ClockTime,

    // Program start time
    pub start_time: ClockTime,

    pub schedule: Schedule,
}

impl Default for ClimateCommand {
    fn default() -> Self {
        Self {
            power: true,
            mode: Mode::Heat,
            temperature: 23,
            fan: FanSpeed::Auto,
            clock: ClockTime::default(),
            end_time: ClockTime::default(),
            start_time: ClockTime::default(),
            schedule: Schedule::Off,
        }
    }
}

impl ClimateCommand {
    /// Heat to the given temperature with everything else at defaults.
    pub fn heat(temperature: u8) -> Self {
        Self {
            mode: Mode::Heat,
            temperature,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Heat,
    Dry,
    Cold,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FanSpeed {
    Auto,

    // Fixed fan level, 0 to 15
    Set(u8),

    VaneAuto,
    VaneMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Schedule {
    Off,
    Start,
    End,
    StartEnd,
}

#[derive(Error, Debug, Clone)]
#[error("unrecognized fan speed {0:?}, expected auto, vane-auto, vane-move or a level")]
pub struct ParseFanSpeedError(String);

impl FromStr for FanSpeed {
    type Err = ParseFanSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "auto" => FanSpeed::Auto,
            "vane-auto" => FanSpeed::VaneAuto,
            "vane-move" => FanSpeed::VaneMove,
            level => FanSpeed::Set(
                level
                    .parse()
                    .map_err(|_| ParseFanSpeedError(s.to_string()))?,
            ),
        })
    }
}

// A quarter-hour quantized time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Quarter-hour ticks since midnight, 6 ticks per hour. The protocol
    /// stores this in one byte, so the value is masked down explicitly.
    pub fn quarter_ticks(&self) -> u8 {
        ((6 * self.hour as u16 + self.minute as u16 / 15) & 0xff) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_ticks() {
        assert_eq!(ClockTime::new(0, 0).quarter_ticks(), 0);
        assert_eq!(ClockTime::new(0, 14).quarter_ticks(), 0);
        assert_eq!(ClockTime::new(1, 30).quarter_ticks(), 8);
        assert_eq!(ClockTime::new(13, 46).quarter_ticks(), 81);
        assert_eq!(ClockTime::new(23, 59).quarter_ticks(), 141);
    }

    #[test]
    fn test_parse_fan_speed() {
        assert_eq!("auto".parse::<FanSpeed>().unwrap(), FanSpeed::Auto);
        assert_eq!("vane-auto".parse::<FanSpeed>().unwrap(), FanSpeed::VaneAuto);
        assert_eq!("vane-move".parse::<FanSpeed>().unwrap(), FanSpeed::VaneMove);
        assert_eq!("5".parse::<FanSpeed>().unwrap(), FanSpeed::Set(5));
        assert!("fast".parse::<FanSpeed>().is_err());
    }
}
