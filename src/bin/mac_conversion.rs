//! Decodes the time and date values of FAT directory entries.

use clap::{ArgAction, ArgGroup, CommandFactory, Parser, error::ErrorKind};
use image_forensics::conversion::mac::{FatDate, FatTime, parse_hex_value, read_hex_file};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mac_conversion",
    version,
    about = "Converts FAT time and date values",
    disable_help_flag = true
)]
#[command(group(ArgGroup::new("module").required(true).args(["time", "date"])))]
#[command(group(ArgGroup::new("source").required(true).args(["file", "hex"])))]
struct Args {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
    /// Use the time conversion module. Either -f or -h must be given
    #[arg(short = 'T', long)]
    time: bool,
    /// Use the date conversion module. Either -f or -h must be given
    #[arg(short = 'D', long)]
    date: bool,
    /// Path to a file holding a hex value such as 0x1234
    #[arg(short = 'f', long, value_name = "filename")]
    file: Option<PathBuf>,
    /// Hex value such as 0x1234
    #[arg(short = 'h', long, value_name = "hex value")]
    hex: Option<String>,
}

fn main() {
    let args = Args::parse();
    stderrlog::new().module(module_path!()).init().unwrap();

    let value = match (&args.file, &args.hex) {
        (Some(path), _) => read_hex_file(path),
        (None, Some(hex)) => parse_hex_value(hex),
        (None, None) => Args::command()
            .error(ErrorKind::MissingRequiredArgument, "either -f or -h must be provided")
            .exit(),
    };

    let result = value.and_then(|value| {
        if args.time {
            Ok(FatTime::decode(value).to_string())
        } else {
            FatDate::decode(value).map(|date| date.to_string())
        }
    });

    match result {
        Ok(line) => println!("{line}"),
        Err(e) => Args::command().error(ErrorKind::ValueValidation, e).exit(),
    }
}
