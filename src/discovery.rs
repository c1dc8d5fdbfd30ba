//! Unit selection.
//!
//! The runner consumes an ordered sequence of loadable units; this module
//! narrows a registered unit list by a glob pattern over unit names,
//! preserving registration order. It is the in-process analog of
//! resolving a file glob to a set of requireable test files: unit names
//! are path-like by convention, so `test/**` and friends read the same.
//!
//! No pattern selects every unit. An invalid pattern is a fatal
//! configuration error surfaced through the CLI error path, never an
//! outcome.

use glob::{Pattern, PatternError};

use crate::runner::Unit;

/// Narrows `units` to those whose names match `pattern`, keeping the
/// original order. `None` selects everything.
pub fn select(units: Vec<Unit>, pattern: Option<&str>) -> Result<Vec<Unit>, PatternError> {
    let Some(pattern) = pattern else {
        return Ok(units);
    };
    let pattern = Pattern::new(pattern)?;
    Ok(units
        .into_iter()
        .filter(|unit| pattern.matches(unit.name()))
        .collect())
}
