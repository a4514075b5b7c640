use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigMalformed,
    ConfigAlreadyExists,

    ValidationMissingArgument,
    ValidationInvalidArgument,

    RegistryNotFound,
    RegistryRequestFailed,

    TranspileUnavailable,

    WriteFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMalformed => "config.malformed",
            ErrorCode::ConfigAlreadyExists => "config.already_exists",

            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::RegistryNotFound => "registry.not_found",
            ErrorCode::RegistryRequestFailed => "registry.request_failed",

            ErrorCode::TranspileUnavailable => "transpile.unavailable",

            ErrorCode::WriteFailed => "write.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMalformedDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigAlreadyExistsDetails {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryNotFoundDetails {
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteFailedDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem: problem.into(),
                id,
            }),
        )
    }

    pub fn config_malformed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ConfigMalformed,
            format!("Configuration file {} malformed", path),
            to_details(ConfigMalformedDetails {
                path,
                error: error.into(),
            }),
        )
        .with_hint("Either fix or remove the configuration file")
    }

    pub fn config_already_exists(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ConfigAlreadyExists,
            format!("Configuration file {} already exists", path),
            to_details(ConfigAlreadyExistsDetails { path }),
        )
        .with_hint("Edit the existing file or remove it before running 'youtools init'")
    }

    pub fn registry_not_found(
        name: impl Into<String>,
        location: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::RegistryNotFound,
            format!("Utility '{}' not found in registry", name),
            to_details(RegistryNotFoundDetails {
                name,
                location: location.into(),
                status,
            }),
        )
    }

    pub fn registry_request_failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        let mut err = Self::new(
            ErrorCode::RegistryRequestFailed,
            "Registry request failed",
            serde_json::json!({ "url": url.into(), "error": error.into() }),
        );
        err.retryable = Some(true);
        err
    }

    pub fn transpile_unavailable(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::TranspileUnavailable,
            "Transpilation service unavailable",
            serde_json::json!({ "reason": reason.into() }),
        )
    }

    pub fn write_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        let error = error.into();
        Self::new(
            ErrorCode::WriteFailed,
            format!("Failed to write {}: {}", path, error),
            to_details(WriteFailedDetails { path, error }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalJsonErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// One-line form used in per-item results and warnings.
    pub fn summary(&self) -> String {
        let cause = self
            .details
            .get("error")
            .or_else(|| self.details.get("reason"))
            .and_then(Value::as_str);
        match cause {
            Some(cause) if !self.message.contains(cause) => {
                format!("{}: {}", self.message, cause)
            }
            _ => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_malformed_names_path() {
        let err = Error::config_malformed("/tmp/project/youtools.json", "missing field `path`");
        assert_eq!(err.code.as_str(), "config.malformed");
        assert_eq!(err.details["path"], "/tmp/project/youtools.json");
        assert!(err.message.contains("/tmp/project/youtools.json"));
        assert_eq!(err.hints.len(), 1);
    }

    #[test]
    fn summary_includes_underlying_cause() {
        let err = Error::internal_io("permission denied", Some("write".to_string()));
        assert_eq!(err.summary(), "IO error: permission denied");

        let err = Error::write_failed("lib/utils/a.js", "disk full");
        assert_eq!(err.summary(), "Failed to write lib/utils/a.js: disk full");

        let err = Error::transpile_unavailable("TRANSPILE_URL is not set");
        assert_eq!(
            err.summary(),
            "Transpilation service unavailable: TRANSPILE_URL is not set"
        );
    }
}
