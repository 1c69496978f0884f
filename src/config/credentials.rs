use std::path::Path;
use crate::errors::CityScanError;
use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Parse `KEY=VALUE` lines of an env file. Blank lines and `#` comments are
/// skipped; an `export ` prefix and one pair of matching quotes are removed.
/// In unquoted values a `#` after whitespace starts a trailing comment.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), parse_value(value.trim()).to_string()))
        })
        .collect()
}

fn parse_value(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(rest) = value.strip_prefix(quote) {
            if let Some(end) = rest.find(quote) {
                return &rest[..end];
            }
        }
    }
    strip_inline_comment(value)
}

fn strip_inline_comment(value: &str) -> &str {
    let mut prev_blank = true;
    for (i, c) in value.char_indices() {
        if c == '#' && prev_blank {
            return value[..i].trim_end();
        }
        prev_blank = c.is_whitespace();
    }
    value
}

/// Load an env file into the process environment without overriding
/// variables that are already set. A missing file loads nothing.
pub fn load_env_file(path: &Path) -> Result<usize, CityScanError> {
    if !path.exists() {
        debug!(path = %path.display(), "No env file");
        return Ok(0);
    }

    let content = std::fs::read_to_string(path)?;
    let mut loaded = 0;
    for (key, value) in parse_env_file(&content) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            loaded += 1;
        }
    }
    debug!(path = %path.display(), loaded, "Loaded env file");
    Ok(loaded)
}
