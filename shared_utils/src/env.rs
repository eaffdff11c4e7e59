use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it is
/// missing or not valid unicode.
///
/// Provider constructors use this for API credentials so that a missing key
/// surfaces as a diagnosable init error instead of a generic `VarError`.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_names_the_variable() {
        let err = get_env_var("SHARED_UTILS_TEST_DOES_NOT_EXIST").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SHARED_UTILS_TEST_DOES_NOT_EXIST"
        );
    }

    #[test]
    fn present_var_is_returned() {
        // PATH is set in any reasonable test environment.
        assert!(get_env_var("PATH").is_ok());
    }
}
