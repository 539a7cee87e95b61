use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};

use acremote::{
    blaster::Transmission,
    mitsubishi::{phy, ClimateCommand, ClockTime, FanSpeed, Frame, Mode, Schedule},
    smartir,
};

#[derive(Parser)]
#[command(about = "Encodes Mitsubishi climate commands for an IR blaster")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode one climate command and print its wire encoding
    Encode(EncodeArgs),

    /// Generate a SmartIR code file covering every supported state
    Smartir,
}

#[derive(Args)]
struct EncodeArgs {
    /// Turn the unit off instead of on
    #[arg(long)]
    off: bool,

    /// Operating mode: heat, dry, cold or auto
    #[arg(long, default_value = "heat")]
    mode: Mode,

    /// Target temperature in Celsius
    #[arg(long, default_value_t = 23)]
    temperature: u8,

    /// Fan speed: auto, vane-auto, vane-move or a numeric level
    #[arg(long, default_value = "auto")]
    fan: FanSpeed,

    /// Current time of day
    #[arg(long, default_value_t = 0)]
    hour: u8,
    #[arg(long, default_value_t = 0)]
    minute: u8,

    /// Program end time
    #[arg(long, default_value_t = 0)]
    end_hour: u8,
    #[arg(long, default_value_t = 0)]
    end_minute: u8,

    /// Program start time
    #[arg(long, default_value_t = 0)]
    start_hour: u8,
    #[arg(long, default_value_t = 0)]
    start_minute: u8,

    /// Program schedule: off, start, end or start-end
    #[arg(long, default_value = "off")]
    schedule: Schedule,

    /// Print the raw pulse listing instead of the base64 wire encoding
    #[arg(long)]
    raw: bool,

    /// Suppress the record dump on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Encode(args) => encode(args),
        Command::Smartir => smartir::gen_smartir(),
    }
}

fn encode(args: EncodeArgs) -> anyhow::Result<()> {
    let command = ClimateCommand {
        power: !args.off,
        mode: args.mode,
        temperature: args.temperature,
        fan: args.fan,
        clock: ClockTime::new(args.hour, args.minute),
        end_time: ClockTime::new(args.end_hour, args.end_minute),
        start_time: ClockTime::new(args.start_hour, args.start_minute),
        schedule: args.schedule,
    };

    let frame = Frame::try_from(&command)?;
    let transmission = Transmission::new(phy::encode(&frame));

    if !args.quiet {
        eprintln!("Pulse Train Data");
        transmission.dump_chunks(&mut io::stderr())?;
    }

    println!("{}", frame.to_hex_line());
    if args.raw {
        println!("{}", transmission.to_raw_format());
    } else {
        println!("{}", transmission.to_base64());
    }
    io::stdout().flush()?;

    Ok(())
}
