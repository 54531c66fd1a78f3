//! Loader: read local JSON snapshots and parameter files. No network I/O.
//! Snapshot loading is strict (unknown enum values, a missing quorum flag or
//! a malformed id fail); parameter files are lenient (every field defaults).

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use mp_core::{validate_input, validate_params, SynthesisInput, SynthesisParams};

use crate::{IoError, IoResult};

fn read_json<T: DeserializeOwned>(path: &Path) -> IoResult<T> {
    let bytes = fs::read(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let value = serde_json::from_slice(&bytes)?;
    Ok(value)
}

/// Load and validate a meeting snapshot.
pub fn load_input(path: &Path) -> IoResult<SynthesisInput> {
    let input: SynthesisInput = read_json(path)?;
    validate_input(&input).map_err(|e| IoError::Invalid(e.to_string()))?;
    tracing::debug!(path = %path.display(), meeting = %input.meeting.id, "snapshot loaded");
    Ok(input)
}

/// Load any defaulted parameter struct (`SynthesisParams`, delivery config).
pub fn load_params<T: DeserializeOwned>(path: &Path) -> IoResult<T> {
    read_json(path)
}

/// `load_params` plus the domain checks of `SynthesisParams`.
pub fn load_synthesis_params(path: &Path) -> IoResult<SynthesisParams> {
    let p: SynthesisParams = load_params(path)?;
    validate_params(&p).map_err(|e| IoError::Invalid(e.to_string()))?;
    Ok(p)
}
