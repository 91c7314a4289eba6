//! Command line flags
//!
//! Anything given here wins over the config file.

use std::path::PathBuf;

use clap::Parser;

/// Cycle through images whose sources may resolve asynchronously
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "lumen-viewer", version, about, long_about = None)]
pub struct ViewerArgs {
    /// Config file instead of the default location
    #[arg(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Resolve every source through a resolver that waits this long
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Apply stale resolutions in arrival order (last writer wins)
    #[arg(long)]
    pub legacy_race: bool,

    /// Image paths, `file://` URLs, or `dir:<path>` for the first image in a folder
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<ViewerArgs, clap::Error> {
        ViewerArgs::try_parse_from(std::iter::once("lumen-viewer").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_flags_and_sources() {
        let parsed = parse(&["a.png", "--delay-ms", "250", "--legacy-race", "dir:covers"]).unwrap();

        assert_eq!(parsed.delay_ms, Some(250));
        assert!(parsed.legacy_race);
        assert_eq!(parsed.sources, vec!["a.png".to_string(), "dir:covers".to_string()]);
        assert_eq!(parsed.config_path, None);
    }

    #[test]
    fn test_parse_config_path() {
        let parsed = parse(&["--config", "/tmp/lumen.yaml"]).unwrap();
        assert_eq!(parsed.config_path, Some(PathBuf::from("/tmp/lumen.yaml")));
        assert!(parsed.sources.is_empty());
        assert!(!parsed.legacy_race);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--delay-ms"]).is_err());
        assert!(parse(&["--delay-ms", "soon"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        ViewerArgs::command().debug_assert();
    }
}
