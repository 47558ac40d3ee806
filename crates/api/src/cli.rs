//! Command-line argument parsing
//!
//! Flags default to the configured booking defaults; `--floor all`
//! disables floor filtering entirely.

use clap::Parser;
use roomctl_domain::Config;

/// List or book available rooms.
#[derive(Debug, Parser)]
#[command(name = "roomctl", version, about = "List or book available meeting rooms.")]
pub struct Cli {
    /// Name of the room to book
    #[arg(short, long)]
    pub name: Option<String>,

    /// Duration in minutes
    #[arg(short, long)]
    pub duration: Option<u32>,

    /// Floor number, or "all" to list all floors
    #[arg(short, long)]
    pub floor: Option<FloorArg>,

    /// Minimum capacity
    #[arg(short, long)]
    pub capacity: Option<u32>,

    /// List available rooms without booking
    #[arg(short, long)]
    pub list: bool,
}

/// Floor filter argument: a floor number or the "all" sentinel
#[derive(Debug, Clone, Copy)]
pub enum FloorArg {
    All,
    Number(i32),
}

impl std::str::FromStr for FloorArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse::<i32>()
                .map(Self::Number)
                .map_err(|_| format!("floor must be an integer or \"all\", got '{s}'"))
        }
    }
}

/// Effective per-invocation options after merging CLI flags with the
/// configured defaults.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub name: Option<String>,
    pub duration_minutes: u32,
    /// `None` disables floor filtering
    pub floor: Option<i32>,
    pub min_capacity: u32,
    pub organizer_email: Option<String>,
    pub list: bool,
}

impl Cli {
    /// Merge parsed flags with configured defaults.
    pub fn into_options(self, config: &Config) -> RunOptions {
        let floor = match self.floor {
            Some(FloorArg::All) => None,
            Some(FloorArg::Number(n)) => Some(n),
            None => Some(config.booking.floor),
        };

        RunOptions {
            name: self.name,
            duration_minutes: self.duration.unwrap_or(config.booking.duration_minutes),
            floor,
            min_capacity: self.capacity.unwrap_or(config.booking.min_capacity),
            organizer_email: config.booking.email.clone(),
            list: self.list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("roomctl").chain(args.iter().copied()))
            .expect("args should parse")
    }

    #[test]
    fn test_defaults_come_from_config() {
        let options = parse(&[]).into_options(&Config::default());
        assert_eq!(options.duration_minutes, 30);
        assert_eq!(options.floor, Some(3));
        assert_eq!(options.min_capacity, 1);
        assert!(!options.list);
    }

    #[test]
    fn test_flags_override_config() {
        let options =
            parse(&["--duration", "60", "--floor", "1", "--capacity", "8", "--list"])
                .into_options(&Config::default());
        assert_eq!(options.duration_minutes, 60);
        assert_eq!(options.floor, Some(1));
        assert_eq!(options.min_capacity, 8);
        assert!(options.list);
    }

    #[test]
    fn test_floor_all_disables_filtering() {
        let options = parse(&["--floor", "all"]).into_options(&Config::default());
        assert_eq!(options.floor, None);
    }

    #[test]
    fn test_floor_all_is_case_insensitive() {
        let options = parse(&["--floor", "ALL"]).into_options(&Config::default());
        assert_eq!(options.floor, None);
    }

    #[test]
    fn test_invalid_floor_rejected() {
        let result =
            Cli::try_parse_from(["roomctl", "--floor", "mezzanine"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_name_flag() {
        let options = parse(&["--name", "Aurora"]).into_options(&Config::default());
        assert_eq!(options.name.as_deref(), Some("Aurora"));
    }
}
