use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Indexed by verbosity: no `-v` logs errors only, each extra `-v` one level more.
const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

/// Highest numeric value `ONBOARDING_LOG_LEVEL` accepts.
const MAX_NUMERIC_LEVEL: u8 = 5;

/// Turn `ONBOARDING_LOG_LEVEL` into a verbosity count: a level name
/// (case-insensitive) or a number up to [`MAX_NUMERIC_LEVEL`].
fn parse_log_level(value: &str) -> Result<u8, String> {
    let value = value.trim();
    if let Ok(count) = value.parse::<u8>() {
        return if count <= MAX_NUMERIC_LEVEL {
            Ok(count)
        } else {
            Err(format!(
                "log level {count} is out of range (0-{MAX_NUMERIC_LEVEL})"
            ))
        };
    }

    LEVELS
        .iter()
        .position(|level| level.as_str().eq_ignore_ascii_case(value))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level: {value}"))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

/// Tracing level for a verbosity count, saturating at `TRACE`.
#[must_use]
pub fn level(verbosity: u8) -> Level {
    LEVELS[usize::from(verbosity).min(LEVELS.len() - 1)]
}

/// Level selected on the command line or through the environment.
#[must_use]
pub fn level_from_matches(matches: &ArgMatches) -> Level {
    level(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    let names: Vec<&str> = LEVELS.iter().map(Level::as_str).collect();
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help(format!(
                "Increase log verbosity: {} (default: ERROR)",
                names.join(", ")
            ))
            .env("ONBOARDING_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_log_level("error"), Ok(0));
        assert_eq!(parse_log_level("WARN"), Ok(1));
        assert_eq!(parse_log_level(" Info "), Ok(2));
        assert_eq!(parse_log_level("debug"), Ok(3));
        assert_eq!(parse_log_level("trace"), Ok(4));
    }

    #[test]
    fn parses_numbers_up_to_max() {
        assert_eq!(parse_log_level("0"), Ok(0));
        assert_eq!(parse_log_level("5"), Ok(5));
        assert!(parse_log_level("6").is_err());
    }

    #[test]
    fn rejects_unknown_levels() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("").is_err());
        assert!(parse_log_level("-1").is_err());
    }

    #[test]
    fn verbosity_saturates_at_trace() {
        assert_eq!(level(0), Level::ERROR);
        assert_eq!(level(1), Level::WARN);
        assert_eq!(level(3), Level::DEBUG);
        assert_eq!(level(4), Level::TRACE);
        assert_eq!(level(9), Level::TRACE);
    }

    #[test]
    fn level_from_matches_follows_flag_count() {
        temp_env::with_var_unset("ONBOARDING_LOG_LEVEL", || {
            let matches =
                with_args(Command::new("onboarding")).get_matches_from(["onboarding", "-vv"]);
            assert_eq!(level_from_matches(&matches), Level::INFO);

            let matches = with_args(Command::new("onboarding")).get_matches_from(["onboarding"]);
            assert_eq!(level_from_matches(&matches), Level::ERROR);
        });
    }
}
