use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser as ClapParser};

use cli::command::{Cli, LogFormat};
use cli::stamp::cmd_stamp;
use mpa::utils::errors::StegoError;

mod cli;
mod input;
mod output;
pub(crate) mod timestamp;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if !cli.has_action() {
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("(or {} -h for more help)", env!("CARGO_PKG_NAME"));
        return ExitCode::FAILURE;
    }

    let mut env_builder = env_logger::Builder::from_default_env();
    env_builder.filter_level(cli.loglevel.to_level_filter());
    match cli.log_format {
        LogFormat::Plain => {
            env_builder.format_timestamp_secs();
        }
        LogFormat::Json => {
            env_builder.format(|buf, record| {
                use std::io::Write;
                writeln!(
                    buf,
                    "{{\"ts\":{},\"lvl\":\"{}\",\"msg\":\"{}\"}}",
                    buf.timestamp(),
                    record.level(),
                    record.args()
                )
            });
        }
    }
    let _ = env_builder.try_init();

    match cmd_stamp(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(
                e.downcast_ref::<StegoError>()
                    .map(StegoError::code)
                    .unwrap_or(1),
            )
        }
    }
}
