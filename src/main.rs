use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{apply, create};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "whitelabel")]
#[command(version = VERSION)]
#[command(about = "Rebrand a product tree from a single brand profile")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a brand profile to the product tree
    Apply(apply::ApplyArgs),
    /// Derive a new brand profile from a brand name
    Create(create::CreateArgs),
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure_exit(e),
    };

    let (json_result, exit_code) = commands::run_json(cli.command);
    output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

/// Help and version go through clap and exit 0; every other parse failure is
/// reported in the JSON envelope and exits 1.
fn parse_failure_exit(e: clap::Error) -> std::process::ExitCode {
    match usage_error(&e) {
        None => match e.print() {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(_) => std::process::ExitCode::from(1),
        },
        Some(err) => {
            let (json_result, exit_code) =
                output::map_cmd_result_to_json::<serde_json::Value>(Err(err));
            output::print_json_result(json_result);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn usage_error(e: &clap::Error) -> Option<whitelabel::Error> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        ErrorKind::MissingSubcommand
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Some(whitelabel::Error::validation_missing_argument(vec![
                "command".to_string(),
            ]))
        }
        _ => Some(whitelabel::Error::validation_invalid_argument(
            "arguments",
            e.to_string().trim().to_string(),
            None,
        )),
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
