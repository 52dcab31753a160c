//! crates/logging/src/config.rs
//! Verbosity configuration combining the global level and per-subsystem flags.

use std::fmt::Write as _;

use super::levels::{Subsystem, SubsystemLevels, level_directive};

/// Combined verbosity configuration.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Per-subsystem levels.
    pub levels: SubsystemLevels,
    /// Suppress everything below errors, including warnings.
    pub quiet: bool,
}

impl VerbosityConfig {
    /// Create a configuration from the number of `-v` flags.
    ///
    /// `0` shows warnings, `1` info, `2` debug, `3` or more trace. At level 2
    /// per-sync-point events stay at info because they are emitted once per
    /// divergence.
    pub fn from_verbose_level(level: u8) -> Self {
        let levels = match level {
            0 | 1 => SubsystemLevels::uniform(level),
            2 => SubsystemLevels {
                sync: 1,
                ..SubsystemLevels::uniform(2)
            },
            _ => SubsystemLevels::uniform(3),
        };
        Self {
            levels,
            quiet: false,
        }
    }

    /// Create a configuration that only reports errors.
    pub fn quiet() -> Self {
        Self {
            levels: SubsystemLevels::default(),
            quiet: true,
        }
    }

    /// Apply a single flag token (e.g., "sync3", "codec").
    pub fn apply_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        let subsystem =
            Subsystem::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.levels.set(subsystem, level);
        Ok(())
    }

    /// Apply a comma-separated list of flag tokens.
    pub fn apply_flags(&mut self, tokens: &str) -> Result<(), String> {
        tokens
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_flag(token))
    }

    /// Renders the configuration as `EnvFilter` directives.
    ///
    /// The global default is `warn` (or `error` when quiet); each subsystem
    /// target gets its own level.
    pub fn filter_directives(&self) -> String {
        if self.quiet {
            return "error".to_owned();
        }
        let mut directives = String::from("warn");
        for subsystem in Subsystem::ALL {
            let _ = write!(
                directives,
                ",{}={}",
                subsystem.target(),
                level_directive(self.levels.get(subsystem))
            );
        }
        directives
    }
}

/// Parse a flag token like "sync2" into ("sync", 2) or "diff" into ("diff", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbose_level_0() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config.levels, SubsystemLevels::uniform(0));
        assert!(!config.quiet);
    }

    #[test]
    fn test_from_verbose_level_2_keeps_sync_at_info() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.levels.diff, 2);
        assert_eq!(config.levels.codec, 2);
        assert_eq!(config.levels.sync, 1);
    }

    #[test]
    fn test_from_verbose_level_saturates_at_trace() {
        assert_eq!(
            VerbosityConfig::from_verbose_level(9).levels,
            SubsystemLevels::uniform(3)
        );
    }

    #[test]
    fn test_parse_flag_token() {
        assert_eq!(parse_flag_token("diff").unwrap(), ("diff", 1));
        assert_eq!(parse_flag_token("sync3").unwrap(), ("sync", 3));
        assert_eq!(parse_flag_token("codec10").unwrap(), ("codec", 10));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("2").is_err());
        assert!(parse_flag_token("diff999").is_err());
    }

    #[test]
    fn test_apply_flags() {
        let mut config = VerbosityConfig::default();
        config.apply_flags("sync3, patch").unwrap();
        assert_eq!(config.levels.sync, 3);
        assert_eq!(config.levels.patch, 1);
        assert_eq!(config.levels.diff, 0);

        assert!(config.apply_flag("delta").is_err());
    }

    #[test]
    fn test_filter_directives() {
        let config = VerbosityConfig::from_verbose_level(1);
        let directives = config.filter_directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("seqdelta::diff=info"));
        assert!(directives.contains("seqdelta::cli=info"));

        assert_eq!(VerbosityConfig::quiet().filter_directives(), "error");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serializes() {
        let config = VerbosityConfig::from_verbose_level(2);
        let json = serde_json::to_string(&config).unwrap();
        let decoded: VerbosityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
