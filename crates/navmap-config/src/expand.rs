//! `${VAR}` and `${VAR:-default}` expansion for config strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand environment references in the value of config `field`.
///
/// Bare `$VAR` is left alone. A variable that is unset (or not valid
/// Unicode) and has no default fails with [`ConfigError::EnvVar`].
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map_err(|e| {
            let reason = match e.cause {
                VarError::NotPresent => "not set",
                VarError::NotUnicode(_) => "is not valid Unicode",
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} {reason}", e.var_name),
            }
        })?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_host_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVMAP_TEST_HOST", "docs.example.com");
        }
        let result = expand_env("https://${NAVMAP_TEST_HOST}", "site.host").unwrap();
        assert_eq!(result, "https://docs.example.com");
        unsafe {
            std::env::remove_var("NAVMAP_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVMAP_UNSET_OUT");
        }
        let result = expand_env("${NAVMAP_UNSET_OUT:-dist}", "output.dir").unwrap();
        assert_eq!(result, "dist");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVMAP_MISSING");
        }
        let err = expand_env("${NAVMAP_MISSING}", "site.host").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NAVMAP_MISSING"));
        assert!(err.to_string().contains("site.host"));
    }

    #[test]
    fn test_expand_missing_var_message() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVMAP_MISSING_DIR");
        }
        let err = expand_env("${NAVMAP_MISSING_DIR}/out", "output.dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in output.dir: ${NAVMAP_MISSING_DIR} not set"
        );
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("docs/$navbar.md", "navigation.path").unwrap();
        assert_eq!(result, "docs/$navbar.md");
    }
}
