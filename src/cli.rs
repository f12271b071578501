use std::path::PathBuf;

use clap::Parser;

/// Serve the 1st and 15th days of every Chinese lunar month of a year as JSON.
#[derive(Parser, Debug)]
#[command(name = "shuowang", version, about)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, env = "SHUOWANG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override host to bind to.
    #[arg(long)]
    pub host: Option<String>,

    /// Override port to bind to.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override civil time offset east of UTC, in minutes (480 for Beijing time).
    #[arg(long = "utc-offset", allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "shuowang",
            "-vv",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
            "--utc-offset",
            "-300",
        ]);
        assert_eq!(2, cli.verbose);
        assert_eq!(Some("127.0.0.1"), cli.host.as_deref());
        assert_eq!(Some(3000), cli.port);
        assert_eq!(Some(-300), cli.utc_offset);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
