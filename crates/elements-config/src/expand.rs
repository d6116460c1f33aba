//! Environment variable expansion for configuration file values.

use crate::{ConfigError, Env};

/// Expand `${VAR}` and `${VAR:-default}` references using `env`.
///
/// An unset variable without a default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str, env: &Env) -> Result<String, ConfigError> {
    shellexpand::env_with_context(value, |name| {
        env.get(name).map(|v| Some(v.to_owned())).ok_or(())
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.var_name),
    })
}
