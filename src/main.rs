//! Live Comment Viewer - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Live Comment Viewer - TUI for streams of live chat comments
#[derive(Parser, Debug)]
#[command(name = "lcv")]
#[command(version)]
#[command(about = "Terminal viewer for live chat comments (JSONL or a demo stream)")]
pub struct Args {
    /// JSONL comment files, merged in order (reads from stdin if none and no --demo)
    pub files: Vec<PathBuf>,

    /// Add a synthetic live stream after the files
    #[arg(long)]
    pub demo: bool,

    /// Demo comments per tick
    #[arg(long, requires = "demo")]
    pub rate: Option<u32>,

    /// Start with follow mode off
    #[arg(long)]
    pub no_follow: bool,

    /// Estimated height of an unmeasured row, in lines
    #[arg(long)]
    pub min_row_height: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = lcv::config::load_config_with_precedence(args.config.clone())?;
        let merged = lcv::config::merge_config(config_file);
        let with_env = lcv::config::apply_env_overrides(merged);

        // Only flags the user actually passed override
        let follow_override = args.no_follow.then_some(false);
        lcv::config::apply_cli_overrides(with_env, follow_override, args.rate, args.min_row_height)
    };
    config.validate()?;

    lcv::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let input_source =
        lcv::source::detect_input_source(args.files.clone(), args.demo.then_some(config.demo_rate))?;

    let settings = lcv::view::ViewSettings::from_config(&config);
    lcv::view::run_with_source(input_source, settings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let err = Args::try_parse_from(["lcv", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let err = Args::try_parse_from(["lcv", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["lcv"]);
        assert!(args.files.is_empty());
        assert!(!args.demo);
        assert_eq!(args.rate, None);
        assert!(!args.no_follow);
        assert_eq!(args.min_row_height, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_files() {
        let args = Args::parse_from(["lcv", "comments.jsonl"]);
        assert_eq!(args.files, vec![PathBuf::from("comments.jsonl")]);
    }

    #[test]
    fn test_several_files_keep_their_order() {
        let args = Args::parse_from(["lcv", "b.jsonl", "a.jsonl"]);
        assert_eq!(args.files, vec![PathBuf::from("b.jsonl"), PathBuf::from("a.jsonl")]);
    }

    #[test]
    fn test_demo_with_rate() {
        let args = Args::parse_from(["lcv", "--demo", "--rate", "5"]);
        assert!(args.demo);
        assert_eq!(args.rate, Some(5));
    }

    #[test]
    fn test_rate_requires_demo() {
        let err = Args::try_parse_from(["lcv", "--rate", "5"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_files_and_demo_combine() {
        let args = Args::parse_from(["lcv", "x.jsonl", "y.jsonl", "--demo"]);
        assert_eq!(args.files.len(), 2);
        assert!(args.demo);
    }

    #[test]
    fn test_rate_rejects_negative() {
        assert!(Args::try_parse_from(["lcv", "--demo", "--rate", "-1"]).is_err());
    }

    #[test]
    fn test_min_row_height_parses_float() {
        let args = Args::parse_from(["lcv", "--min-row-height", "2.5"]);
        assert_eq!(args.min_row_height, Some(2.5));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["lcv", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_flags_flow_through_config_precedence_chain() {
        use lcv::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            follow: Some(true),
            demo_rate: Some(3),
            min_row_height: Some(2.0),
            ..ConfigFile::default()
        };
        let merged = merge_config(Some(config_file));
        assert_eq!(merged.demo_rate, 3, "Config file should override default rate");

        let args = Args::parse_from(["lcv", "--demo", "--rate", "9", "--no-follow"]);
        let resolved = apply_cli_overrides(
            merged,
            args.no_follow.then_some(false),
            args.rate,
            args.min_row_height,
        );

        assert!(!resolved.follow, "--no-follow should override the config file");
        assert_eq!(resolved.demo_rate, 9);
        assert_eq!(resolved.min_row_height, 2.0, "unset flags keep file values");
        assert!(resolved.validate().is_ok());
    }

    #[test]
    fn test_invalid_min_row_height_fails_validation() {
        let args = Args::parse_from(["lcv", "--min-row-height", "0"]);
        let resolved = lcv::config::apply_cli_overrides(
            lcv::config::merge_config(None),
            None,
            None,
            args.min_row_height,
        );
        assert!(resolved.validate().is_err());
    }
}
