use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};

#[derive(Debug, ClapParser)]
#[command(
    name       = env!("CARGO_PKG_NAME"),
    version    = env!("CARGO_PKG_VERSION"),
    author     = env!("CARGO_PKG_AUTHORS"),
    about      = "Store and retrieve data in the private bits of MP3 frame headers",
    long_about = "This program can store and retrieve data into/from the private bits of MP3 \
                  frame headers. You might like to use it as a way of applying watermarks to \
                  your music files (although it is of course easy to circumvent).",
)]
pub struct Cli {
    /// Print out the hidden bit data of the input file.
    #[arg(short, long)]
    pub print: bool,

    /// Provide a string to be embedded into the MP3 data.
    #[arg(short, long, value_name = "STRING")]
    pub stego: Option<String>,

    /// Specify an output filename for the modified MP3 (use "-" for stdout).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print stream information.
    #[arg(short, long)]
    pub info: bool,

    /// Stream information output format.
    #[arg(long, value_enum, default_value_t = InfoFormat::Plain)]
    pub info_format: InfoFormat,

    /// Set the log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Source MP3 file to examine and/or modify (use "-" for stdin).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Whether any option asking for work was given.
    pub fn has_action(&self) -> bool {
        self.print || self.info || self.stego.is_some() || self.output.is_some()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum InfoFormat {
    /// Aligned human-readable text.
    Plain,
    /// YAML document.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_command() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_original_options() {
        let cli =
            Cli::try_parse_from(["stamp3r", "-p", "-s", "Stego", "-o", "out.mp3", "in.mp3"])
                .unwrap();

        assert!(cli.print);
        assert_eq!(cli.stego.as_deref(), Some("Stego"));
        assert_eq!(cli.output, Some(PathBuf::from("out.mp3")));
        assert_eq!(cli.input, Some(PathBuf::from("in.mp3")));
        assert!(cli.has_action());
    }

    #[test]
    fn input_without_action() {
        let cli = Cli::try_parse_from(["stamp3r", "in.mp3"]).unwrap();
        assert!(!cli.has_action());

        let cli = Cli::try_parse_from(["stamp3r", "-p"]).unwrap();
        assert!(cli.has_action());
        assert_eq!(cli.input, None);
    }

    #[test]
    fn info_format() {
        let cli = Cli::try_parse_from(["stamp3r", "-i", "--info-format", "yaml", "in.mp3"])
            .unwrap();

        assert!(cli.info);
        assert_eq!(cli.info_format, InfoFormat::Yaml);
    }

    #[test]
    fn rejects_unknown_option() {
        assert!(Cli::try_parse_from(["stamp3r", "-x", "in.mp3"]).is_err());
        assert!(Cli::try_parse_from(["stamp3r", "-s"]).is_err());
    }
}
