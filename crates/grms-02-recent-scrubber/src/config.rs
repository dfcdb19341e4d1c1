//! Command-line arguments and resolved settings

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

/// File name of the blacklist inside the data directory
pub const BLACKLIST_FILE_NAME: &str = "grms.conf";

/// File name of the recent records inside the data directory
pub const RECENT_FILE_NAME: &str = "recently-used.xbel";

/// Verbosity when neither `-v` nor `-q` is given (warnings and up)
const DEFAULT_VERBOSITY: i16 = 2;

const LOG_LEVELS: [LevelFilter; 5] = [
    LevelFilter::OFF,
    LevelFilter::ERROR,
    LevelFilter::WARN,
    LevelFilter::INFO,
    LevelFilter::DEBUG,
];

/// Watch the recent files list and remove anything matching a hashed
/// blacklist of URI prefixes.
///
/// The blacklist lives in the data directory and stores only hashes, so it
/// is likely to be mistaken for a mapping between content hashes and visit
/// counts.
#[derive(Parser, Debug, Clone)]
#[command(name = "grms", author, version, about, long_about = None)]
pub struct Args {
    /// Increase the verbosity. Use twice for extra effect.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease the verbosity. Use twice for extra effect.
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Purge all Recently Used entries during the initial scrub.
    #[arg(long, help_heading = "Resident-Compatible Actions")]
    pub purge: bool,

    /// Blacklist file [default: $XDG_DATA_HOME/grms.conf]
    #[arg(long, value_name = "FILE", help_heading = "Resident-Compatible Actions")]
    pub config: Option<PathBuf>,

    /// Recently Used file [default: $XDG_DATA_HOME/recently-used.xbel]
    #[arg(long, value_name = "FILE", help_heading = "Resident-Compatible Actions")]
    pub recent_file: Option<PathBuf>,

    /// Scrub once and exit instead of staying resident.
    #[arg(long, help_heading = "Resident-Compatible Actions")]
    pub once: bool,

    /// How often to check the Recently Used file for changes, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1000, help_heading = "Resident-Compatible Actions")]
    pub poll_ms: u64,

    /// Add URI to the list of blacklisted prefixes and exit.
    #[arg(short = 'a', long = "add", value_name = "URI", help_heading = "Non-Resident Actions")]
    pub additions: Vec<String>,

    /// Remove prefixes from the blacklist which match URI and exit.
    #[arg(short = 'r', long = "remove", value_name = "URI", help_heading = "Non-Resident Actions")]
    pub removals: Vec<String>,
}

impl Args {
    /// Log level after applying `-v` and `-q`, clamped to the known levels
    pub fn log_level(&self) -> LevelFilter {
        let index = (DEFAULT_VERBOSITY + i16::from(self.verbose) - i16::from(self.quiet))
            .clamp(0, LOG_LEVELS.len() as i16 - 1);
        LOG_LEVELS[index as usize]
    }

    /// True when the invocation edits the blacklist instead of scrubbing
    pub fn is_edit(&self) -> bool {
        !self.additions.is_empty() || !self.removals.is_empty()
    }
}

/// Settings resolved from the command line and the environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrubberConfig {
    pub blacklist_path: PathBuf,
    pub recent_path: PathBuf,
    pub poll_interval: Duration,
    pub purge: bool,
    pub once: bool,
}

impl ScrubberConfig {
    pub fn from_args(args: &Args) -> Self {
        let data_dir = data_dir();
        Self {
            blacklist_path: args
                .config
                .clone()
                .unwrap_or_else(|| data_dir.join(BLACKLIST_FILE_NAME)),
            recent_path: args
                .recent_file
                .clone()
                .unwrap_or_else(|| data_dir.join(RECENT_FILE_NAME)),
            poll_interval: Duration::from_millis(args.poll_ms.max(1)),
            purge: args.purge,
            once: args.once,
        }
    }
}

/// `$XDG_DATA_HOME`, falling back to `~/.local/share`
///
/// The blacklist is kept here so it roams with the rest of the user's data.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("grms").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(parse(&[]).log_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_verbosity_is_clamped() {
        assert_eq!(parse(&["-v"]).log_level(), LevelFilter::INFO);
        assert_eq!(parse(&["-vvvvv"]).log_level(), LevelFilter::DEBUG);
        assert_eq!(parse(&["-q"]).log_level(), LevelFilter::ERROR);
        assert_eq!(parse(&["-qqqq"]).log_level(), LevelFilter::OFF);
        assert_eq!(parse(&["-vv", "-q"]).log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_repeated_edits() {
        let args = parse(&["-a", "/one", "--add", "/two", "-r", "/three"]);

        assert!(args.is_edit());
        assert_eq!(args.additions, vec!["/one", "/two"]);
        assert_eq!(args.removals, vec!["/three"]);
    }

    #[test]
    fn test_resident_is_not_edit() {
        let args = parse(&["--purge", "--once"]);
        assert!(!args.is_edit());
        assert!(args.purge);
        assert!(args.once);
    }

    #[test]
    fn test_explicit_paths_override_defaults() {
        let args = parse(&[
            "--config",
            "/tmp/bl.conf",
            "--recent-file",
            "/tmp/recent.xbel",
            "--poll-ms",
            "250",
        ]);
        let config = ScrubberConfig::from_args(&args);

        assert_eq!(config.blacklist_path, PathBuf::from("/tmp/bl.conf"));
        assert_eq!(config.recent_path, PathBuf::from("/tmp/recent.xbel"));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_default_paths_share_the_data_dir() {
        let config = ScrubberConfig::from_args(&parse(&[]));

        assert!(config.blacklist_path.ends_with(BLACKLIST_FILE_NAME));
        assert!(config.recent_path.ends_with(RECENT_FILE_NAME));
        assert_eq!(config.blacklist_path.parent(), config.recent_path.parent());
    }
}
