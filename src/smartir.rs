use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    blaster::Transmission,
    mitsubishi::{phy, ClimateCommand, FanSpeed, Frame, Mode},
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CodeFile {
    pub manufacturer: String,
    pub supported_models: Vec<String>,
    pub supported_controller: String,
    pub commands_encoding: String,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub precision: u8,
    pub operation_modes: Vec<String>,
    pub fan_modes: Vec<String>,
    pub commands: serde_json::Value,
}

// SmartIR fan mode names and the protocol settings behind them
const FAN_MODES: [(&str, FanSpeed); 4] = [
    ("auto", FanSpeed::Auto),
    ("low", FanSpeed::Set(1)),
    ("mid", FanSpeed::Set(2)),
    ("high", FanSpeed::Set(3)),
];

/// Generates a SmartIR code file from all possible states
pub fn gen_smartir() -> anyhow::Result<()> {
    let commands: serde_json::Value = {
        // Commands are nested to represent all possible states, the
        // hierarchy used in other models is: mode -> fan -> temperature
        let mut all_commands = serde_json::Map::new();

        for mode in Mode::iter() {
            let mut fan_map = serde_json::Map::new();

            for (name, fan) in FAN_MODES {
                let mut temperature_map = serde_json::Map::new();

                for temperature in 16..=31 {
                    let command = ClimateCommand {
                        power: true,
                        mode,
                        temperature,
                        fan,
                        ..ClimateCommand::default()
                    };

                    temperature_map
                        .insert(temperature.to_string(), encode_command(&command)?.into());
                }

                fan_map.insert(name.into(), temperature_map.into());
            }

            all_commands.insert(mode.as_ref().to_lowercase(), fan_map.into());
        }

        // Add "Off" state
        let off_command = ClimateCommand {
            power: false,
            ..ClimateCommand::default()
        };
        all_commands.insert("off".into(), encode_command(&off_command)?.into());

        all_commands.into()
    };

    let code_file = CodeFile {
        manufacturer: "Mitsubishi Electric".into(),
        supported_models: vec!["MSZ-GE".into(), "MSZ-SF".into()],
        supported_controller: "Broadlink".into(),
        commands_encoding: "Base64".into(),
        min_temperature: 16.0,
        max_temperature: 31.0,
        precision: 1,
        operation_modes: Mode::iter().map(|m| m.as_ref().to_lowercase()).collect(),
        fan_modes: FAN_MODES.iter().map(|(name, _)| name.to_string()).collect(),
        commands,
    };

    println!("{}", serde_json::to_string_pretty(&code_file)?);

    Ok(())
}

fn encode_command(command: &ClimateCommand) -> anyhow::Result<String> {
    let frame = Frame::try_from(command)?;
    Ok(Transmission::new(phy::encode(&frame)).to_base64())
}
