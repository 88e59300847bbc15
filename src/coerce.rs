//! Core coercion pipeline: apply a decoded config to a flag registry.
//!
//! The steps for one call:
//!
//! 1. Snapshot the flags the user already set (never overwritten)
//! 2. Decode the TOML text into a top-level table
//! 3. For every other flag, in registry order, look up its config key
//! 4. Render the config value to text according to the flag's [`FlagKind`]
//! 5. Hand the text to the registry's setter
//!
//! The first failure aborts the call. Flags applied before it stay applied;
//! flags after it are not touched.

use std::collections::HashSet;
use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use crate::error::FlagfigError;
use crate::registry::FlagRegistry;
use crate::types::{Flag, FlagKind};

/// Decode `content` as TOML and apply it to every flag not explicitly set.
pub fn apply_config<R: FlagRegistry + ?Sized>(
    content: &str,
    registry: &mut R,
) -> Result<(), FlagfigError> {
    let explicit = registry.explicit_flags();
    let table: Table = content
        .parse()
        .map_err(|source| FlagfigError::Decode { source })?;
    apply_with(&table, &explicit, registry)
}

/// Like [`apply_config`] for a table the caller already decoded.
pub fn apply_table<R: FlagRegistry + ?Sized>(
    table: &Table,
    registry: &mut R,
) -> Result<(), FlagfigError> {
    let explicit = registry.explicit_flags();
    apply_with(table, &explicit, registry)
}

/// Read the file at `path` and apply it with [`apply_config`].
pub fn apply_file<R: FlagRegistry + ?Sized>(
    path: &Path,
    registry: &mut R,
) -> Result<(), FlagfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| FlagfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    apply_config(&content, registry)
}

fn apply_with<R: FlagRegistry + ?Sized>(
    table: &Table,
    explicit: &HashSet<String>,
    registry: &mut R,
) -> Result<(), FlagfigError> {
    for flag in registry.flags() {
        if explicit.contains(&flag.name) {
            continue;
        }
        let Some(value) = table.get(&flag.config_key()) else {
            continue;
        };

        let text = render(&flag, value)?;
        registry
            .set(&flag.name, &text)
            .map_err(|reason| FlagfigError::SetFailure {
                flag: flag.name.clone(),
                value: value.to_string(),
                reason,
            })?;
        debug!(flag = %flag.name, value = %text, "applied config value");
    }
    Ok(())
}

/// Render a config value as the text a flag of `flag.kind` accepts.
fn render(flag: &Flag, value: &Value) -> Result<String, FlagfigError> {
    let text = match flag.kind {
        // durations are plain strings in TOML
        FlagKind::String | FlagKind::Duration => value.as_str().map(str::to_string),
        FlagKind::Float => value.as_float().map(format_float),
        FlagKind::SignedInt => value.as_integer().map(|i| i.to_string()),
        FlagKind::UnsignedInt => value.as_integer().map(|i| (i as u64).to_string()),
        FlagKind::Bool => value.as_bool().map(|b| b.to_string()),
        FlagKind::SelfDescribing => render_scalar(value),
        FlagKind::Other(_) => {
            return Err(FlagfigError::UnsupportedKind {
                flag: flag.name.clone(),
                kind: flag.kind,
                value: value.to_string(),
            });
        }
    };

    text.ok_or_else(|| FlagfigError::SetFailure {
        flag: flag.name.clone(),
        value: value.to_string(),
        reason: format!(
            "expected {}, found {}",
            expected(flag.kind),
            value.type_str()
        ),
    })
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(format_float(*f)),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

fn expected(kind: FlagKind) -> &'static str {
    match kind {
        FlagKind::String => "a string",
        FlagKind::Duration => "a duration string",
        FlagKind::Float => "a float",
        FlagKind::SignedInt | FlagKind::UnsignedInt => "an integer",
        FlagKind::Bool => "a boolean",
        FlagKind::SelfDescribing | FlagKind::Other(_) => "a scalar value",
    }
}

/// Shortest text that parses back to the same `f64`.
///
/// Plain decimal inside `[1e-4, 1e21)`, exponent form outside it.
fn format_float(f: f64) -> String {
    let abs = f.abs();
    if f == 0.0 || !f.is_finite() || (1e-4..1e21).contains(&abs) {
        format!("{f}")
    } else {
        format!("{f:e}")
    }
}
