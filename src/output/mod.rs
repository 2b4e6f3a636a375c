// Output formatting: terminal display and plot-ready series.

pub mod series;
pub mod terminal;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize any output value as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
