use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal to-do list with notes, a daily quote and today's name days.
/// Tasks are stored under ~/.daylist or the directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "daylist", version, about = "Terminal to-do list")]
pub struct Cli {
    /// Directory holding the task store and log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolve the data directory, falling back to `$HOME/.daylist`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".daylist")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Location;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["daylist"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_explicit_data_dir() {
        let cli = Cli::try_parse_from(["daylist", "--data-dir", "/tmp/tasks", "list"]).unwrap();
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/tasks"));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_ui_start_location() {
        let cli = Cli::try_parse_from(["daylist", "ui", "--at", "/task/12", "--offline"]).unwrap();
        match cli.command {
            Some(Commands::Ui { at, offline, country }) => {
                assert_eq!(at, Location::Detail(12));
                assert!(offline);
                assert_eq!(country, "pl");
            }
            _ => panic!("expected ui command"),
        }
        assert!(Cli::try_parse_from(["daylist", "ui", "--at", "/nowhere"]).is_err());
    }

    #[test]
    fn test_note_allows_empty_text() {
        let cli = Cli::try_parse_from(["daylist", "note", "5", ""]).unwrap();
        match cli.command {
            Some(Commands::Note { id, text }) => {
                assert_eq!(id, 5);
                assert_eq!(text, "");
            }
            _ => panic!("expected note command"),
        }
    }
}
