//! Terminal logging for the CLI.

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use crate::CliError;

/// Level used when `--verbose` is given.
pub(crate) const VERBOSE_LEVEL: LevelFilter = LevelFilter::Debug;
/// Level used otherwise.
pub(crate) const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

pub(crate) const fn level_for(verbose: bool) -> LevelFilter {
    if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL }
}

/// Install a stderr logger for library diagnostics.
pub(crate) fn init_logging(verbose: bool) -> Result<(), CliError> {
    let config = ConfigBuilder::new().build();
    TermLogger::init(
        level_for(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}
