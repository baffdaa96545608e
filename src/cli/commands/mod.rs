//! CLI command implementations

pub mod analyze;
pub mod duel;
pub mod play;

use anyhow::{Result, bail};

use crate::tictactoe::Variant;

/// Parse a `--variant` token (`standard` or `misere`)
pub fn parse_variant(value: &str) -> Result<Variant> {
    match value.to_lowercase().as_str() {
        "standard" => Ok(Variant::Standard),
        "misere" | "anti" => Ok(Variant::Misere),
        other => bail!("unknown variant '{other}' (expected 'standard' or 'misere')"),
    }
}
