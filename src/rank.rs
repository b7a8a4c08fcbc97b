//! Parsing of the optional `rank` query parameter.

use crate::error::{DecompositionError, Result};

/// Parses a rank request.
///
/// An absent or empty value means "no truncation" and yields `None`. Otherwise the value
/// must consist of ASCII digits only and denote an integer of at least 1. Values too large
/// for `usize` saturate, since truncation clamps to the natural rank anyway.
pub fn parse_rank(raw: Option<&str>) -> Result<Option<usize>> {
    let raw = match raw {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecompositionError::InvalidRank(raw.to_string()));
    }
    let rank = raw.parse::<usize>().unwrap_or(usize::MAX);
    if rank == 0 {
        return Err(DecompositionError::InvalidRank(raw.to_string()));
    }
    Ok(Some(rank))
}
