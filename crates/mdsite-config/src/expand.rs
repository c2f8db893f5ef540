//! `${VAR}` substitution in path values read from `mdsite.toml`.
//!
//! Lets one config file serve several environments, e.g.
//! `output_dir = "${MDSITE_OUTPUT_DIR:-public}"`.

use crate::ConfigError;

/// Variable named in a `${..}` reference that has no value and no fallback.
struct UnsetVar(String);

fn lookup(name: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(name)
        .map(Some)
        .map_err(|_| UnsetVar(name.to_owned()))
}

/// Substitute `${NAME}` and `${NAME:-fallback}` inside `value`.
///
/// `field` names the config key for error messages. A plain `$NAME` is kept
/// as written.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}
