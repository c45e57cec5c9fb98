use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// Which flavour of the demo to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Month grid and day list; events carry no id, every save appends.
    Basic,
    /// Adds event ids, editing and the timeline view.
    Timeline,
}

impl Variant {
    pub fn has_ids(self) -> bool {
        self == Variant::Timeline
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Timeline => "timeline",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "org-calendar", version, about = "Organization event calendar in the terminal")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Variant::Timeline)]
    pub variant: Variant,

    /// Seed the event generator for a reproducible calendar.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file [default: <config dir>/org-calendar/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file [default: <data dir>/org-calendar/org-calendar.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "org-calendar",
            "--variant",
            "basic",
            "--seed",
            "42",
            "--date",
            "2024-05-03",
        ])
        .unwrap();
        assert_eq!(cli.variant, Variant::Basic);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert!(cli.config.is_none());
    }

    #[test]
    fn defaults_to_timeline() {
        let cli = Cli::try_parse_from(["org-calendar"]).unwrap();
        assert_eq!(cli.variant, Variant::Timeline);
        assert!(cli.variant.has_ids());
    }
}
