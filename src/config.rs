//! Command-line and environment configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default listen address for `serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default directory holding `index.html`
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Parser, Debug)]
#[command(
    name = "calculator",
    about = "Arithmetic guessing game: evaluate a random 4-operand expression",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play one round in the terminal (default)
    Play,

    /// Serve the JSON API backed by SQLite
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "CALCULATOR_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// SQLite database file (defaults to the local data directory)
    #[arg(long = "db", env = "CALCULATOR_DB")]
    pub db_path: Option<PathBuf>,

    /// Directory containing index.html
    #[arg(long, env = "CALCULATOR_PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,
}

/// Resolved settings for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub public_dir: PathBuf,
}

impl From<ServeArgs> for ServeConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind: args.bind,
            db_path: args.db_path.unwrap_or_else(default_db_path),
            public_dir: args.public_dir,
        }
    }
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("calculator").join("calculator.sqlite")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_config(args: &[&str]) -> ServeConfig {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Command::Serve(serve)) => serve.into(),
            other => panic!("expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["calculator"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_play_subcommand() {
        let cli = Cli::try_parse_from(["calculator", "play"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Play)));
    }

    #[test]
    fn test_serve_explicit_flags() {
        let config = serve_config(&[
            "calculator",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--db",
            "/tmp/games.sqlite",
            "--public-dir",
            "web",
        ]);

        assert_eq!(config.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.db_path, PathBuf::from("/tmp/games.sqlite"));
        assert_eq!(config.public_dir, PathBuf::from("web"));
    }

    #[test]
    fn test_serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["calculator", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn test_default_db_path_file_name() {
        let path = default_db_path();
        assert!(path.ends_with("calculator/calculator.sqlite"));
    }
}
