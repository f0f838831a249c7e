//! Environment loading helpers.
//!
//! Fallback chains are maintained here so business code never repeats
//! `or_else` ladders against `std::env::var`.

use std::env;

/// Load `.env` from the current directory into the environment, once per
/// process. Existing variables are never overwritten.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        if let Ok(content) = std::fs::read_to_string(&path) {
            tracing::debug!(path = %path.display(), "Loading .env");
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some(eq_pos) = line.find('=') {
                    let key = line[..eq_pos].trim();
                    let mut value = line[eq_pos + 1..].trim();
                    if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                        || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
                    {
                        value = &value[1..value.len() - 1];
                    }
                    if !key.is_empty() && env::var(key).is_err() {
                        #[allow(unsafe_code)]
                        unsafe {
                            env::set_var(key, value);
                        }
                    }
                }
            }
        }
    });
}

/// Read from the primary variable or an alias chain, falling back to a default.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Read from the primary variable or an alias chain; empty values count as
/// unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// Parse a boolean variable: 0/false/no/off are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    match v.as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

/// Parse an integer variable, falling back to the default on absence or
/// unparseable input.
pub fn env_u64(primary: &str, aliases: &[&str], default: u64) -> u64 {
    env_optional(primary, aliases)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}
