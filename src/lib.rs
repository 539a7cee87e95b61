pub mod blaster;
pub mod mitsubishi;
pub mod smartir;

pub use blaster::Transmission;
pub use mitsubishi::{ClimateCommand, ClockTime, EncodeError, FanSpeed, Frame, Mode, Schedule};
