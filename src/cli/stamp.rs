use anyhow::Result;
use log::{info, warn};

use super::command::Cli;
use super::info::cmd_info;
use crate::input::{display_name, read_input};
use crate::output::write_output;
use mpa::process::channel::{Mp3File, PrivateData};
use mpa::utils::errors::StegoError;

pub fn cmd_stamp(cli: &Cli) -> Result<()> {
    let input = cli.input.as_deref().ok_or(StegoError::NoInputFile)?;

    let mut file = Mp3File::from_bytes(read_input(input)?)?;
    println!("{}", loaded_message(&display_name(input), &file));

    if cli.info {
        cmd_info(input, &file, cli.info_format)?;
    }

    if cli.print {
        println!("{}", hidden_data_message(&file.extract()));
    }

    match (cli.stego.as_deref(), cli.output.as_deref()) {
        (Some(payload), Some(output)) => {
            file.embed(payload.as_bytes())?;
            write_output(output, file.as_bytes())?;
            info!(
                "Embedded {} bytes into {}",
                payload.len(),
                output.display()
            );
        }
        (Some(_), None) => warn!("No output file specified, nothing embedded"),
        (None, Some(_)) => warn!("No data to embed specified, no output written"),
        (None, None) => {}
    }

    Ok(())
}

fn loaded_message(name: &str, file: &Mp3File) -> String {
    format!(
        "File \"{name}\" loaded, {} bits available ({} bytes)",
        file.capacity(),
        file.capacity_bytes()
    )
}

fn hidden_data_message(data: &PrivateData) -> String {
    if data.message().is_empty() {
        "The file contains no hidden data".to_string()
    } else {
        format!("Hidden data:\n{data}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_stream;
    use clap::Parser as ClapParser;
    use std::ffi::OsStr;
    use std::path::PathBuf;

    fn parse(args: &[&OsStr]) -> Result<Cli> {
        let args = std::iter::once(OsStr::new("stamp3r")).chain(args.iter().copied());
        Ok(Cli::try_parse_from(args)?)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stamp3r-{}-{name}", std::process::id()))
    }

    #[test]
    fn messages() -> Result<()> {
        let mut file = Mp3File::from_bytes(test_stream(50))?;
        assert_eq!(
            loaded_message("song.mp3", &file),
            "File \"song.mp3\" loaded, 50 bits available (6 bytes)"
        );
        assert_eq!(
            hidden_data_message(&file.extract()),
            "The file contains no hidden data"
        );

        file.embed(b"Stego")?;
        assert_eq!(hidden_data_message(&file.extract()), "Hidden data:\nStego");

        Ok(())
    }

    #[test]
    fn embeds_into_output_file() -> Result<()> {
        let input = temp_path("in.mp3");
        let output = temp_path("out.mp3");
        std::fs::write(&input, test_stream(50))?;

        let cli = parse(&[
            OsStr::new("-s"),
            OsStr::new("Stego"),
            OsStr::new("-o"),
            output.as_os_str(),
            input.as_os_str(),
        ])?;
        cmd_stamp(&cli)?;

        let stamped = Mp3File::from_bytes(std::fs::read(&output)?)?;
        let original = std::fs::read(&input)?;
        std::fs::remove_file(&input)?;
        std::fs::remove_file(&output)?;

        assert_eq!(stamped.extract().message(), b"Stego");
        assert_eq!(original, test_stream(50));

        Ok(())
    }

    #[test]
    fn lone_stego_writes_nothing() -> Result<()> {
        let input = temp_path("lone.mp3");
        std::fs::write(&input, test_stream(50))?;

        let cli = parse(&[OsStr::new("-s"), OsStr::new("Stego"), input.as_os_str()])?;
        cmd_stamp(&cli)?;

        let unchanged = std::fs::read(&input)?;
        std::fs::remove_file(&input)?;
        assert_eq!(unchanged, test_stream(50));

        Ok(())
    }

    #[test]
    fn error_codes() -> Result<()> {
        let cli = parse(&[OsStr::new("-p")])?;
        let err = cmd_stamp(&cli).unwrap_err();
        assert_eq!(err.downcast_ref::<StegoError>().map(StegoError::code), Some(7));

        let input = temp_path("short.mp3");
        let output = temp_path("short-out.mp3");
        std::fs::write(&input, test_stream(8))?;

        let cli = parse(&[
            OsStr::new("-s"),
            OsStr::new("Stego"),
            OsStr::new("-o"),
            output.as_os_str(),
            input.as_os_str(),
        ])?;
        let err = cmd_stamp(&cli).unwrap_err();
        std::fs::remove_file(&input)?;

        assert_eq!(err.downcast_ref::<StegoError>().map(StegoError::code), Some(5));
        assert!(!output.exists());

        Ok(())
    }
}
