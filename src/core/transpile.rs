//! Output form selection and the transpilation service contract.

use reqwest::blocking::Client;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::project::Project;
use crate::registry::HTTP_TIMEOUT;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TRANSPILE_URL_ENV: &str = "TRANSPILE_URL";

/// Turns TypeScript source into JavaScript.
pub trait Transpiler {
    fn transpile(&self, source: &str) -> Result<String>;
}

/// Posts source text to an HTTP endpoint and reads the transpiled body back.
pub struct RemoteTranspiler {
    client: Client,
    url: Option<String>,
}

impl RemoteTranspiler {
    pub fn new(url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("youtools/{}", VERSION))
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::internal_io(e.to_string(), Some("create HTTP client".to_string())))?;

        Ok(Self {
            client,
            url: url.filter(|u| !u.trim().is_empty()),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var(TRANSPILE_URL_ENV).ok())
    }
}

impl Transpiler for RemoteTranspiler {
    fn transpile(&self, source: &str) -> Result<String> {
        let url = self.url.as_deref().ok_or_else(|| {
            Error::transpile_unavailable(format!("{} is not set", TRANSPILE_URL_ENV))
        })?;

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(source.to_string())
            .send()
            .map_err(|e| Error::transpile_unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transpile_unavailable(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .map_err(|e| Error::transpile_unavailable(e.to_string()))
    }
}

/// Form a utility is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// TypeScript, copied verbatim.
    Native,
    /// JavaScript produced by the transpiler.
    Transpiled,
}

impl OutputMode {
    /// Native output needs both the option and the project's tsconfig.json.
    pub fn detect(use_native_language: bool, project: &Project) -> Self {
        if use_native_language && project.has_typescript_marker() {
            OutputMode::Native
        } else {
            OutputMode::Transpiled
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputMode::Native => "ts",
            OutputMode::Transpiled => "js",
        }
    }

    pub fn index_file_name(&self) -> String {
        format!("index.{}", self.extension())
    }
}

/// Text to write, plus the reason if the transpiler had to be skipped.
#[derive(Debug)]
pub struct Transformed {
    pub text: String,
    pub warning: Option<Error>,
}

/// Produce the text to materialize for `mode`.
///
/// Transpiler failures and empty responses fall back to the original source.
pub fn select(source: String, mode: OutputMode, transpiler: &dyn Transpiler) -> Transformed {
    if mode == OutputMode::Native {
        return Transformed {
            text: source,
            warning: None,
        };
    }

    match transpiler.transpile(&source) {
        Ok(output) if !output.trim().is_empty() => Transformed {
            text: output,
            warning: None,
        },
        Ok(_) => Transformed {
            text: source,
            warning: Some(Error::transpile_unavailable("transpiler returned an empty body")),
        },
        Err(err) => Transformed {
            text: source,
            warning: Some(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct Fixed(Result<String>, Cell<usize>);

    impl Transpiler for Fixed {
        fn transpile(&self, _source: &str) -> Result<String> {
            self.1.set(self.1.get() + 1);
            self.0.clone()
        }
    }

    #[test]
    fn native_mode_passes_source_through() {
        let transpiler = Fixed(Ok("js".to_string()), Cell::new(0));
        let out = select("ts source".to_string(), OutputMode::Native, &transpiler);

        assert_eq!(out.text, "ts source");
        assert!(out.warning.is_none());
        assert_eq!(transpiler.1.get(), 0);
    }

    #[test]
    fn transpiled_mode_uses_service_output() {
        let transpiler = Fixed(Ok("var x = 1;".to_string()), Cell::new(0));
        let out = select("let x: number = 1;".to_string(), OutputMode::Transpiled, &transpiler);

        assert_eq!(out.text, "var x = 1;");
        assert!(out.warning.is_none());
    }

    #[test]
    fn service_failure_falls_back_to_source() {
        let transpiler = Fixed(Err(Error::transpile_unavailable("connection refused")), Cell::new(0));
        let out = select("let x: number = 1;".to_string(), OutputMode::Transpiled, &transpiler);

        assert_eq!(out.text, "let x: number = 1;");
        assert_eq!(out.warning.unwrap().code.as_str(), "transpile.unavailable");
    }

    #[test]
    fn empty_service_output_falls_back_to_source() {
        let transpiler = Fixed(Ok("  \n".to_string()), Cell::new(0));
        let out = select("const a = 1;".to_string(), OutputMode::Transpiled, &transpiler);

        assert_eq!(out.text, "const a = 1;");
        assert!(out.warning.is_some());
    }

    #[test]
    fn remote_transpiler_without_url_is_unavailable() {
        let transpiler = RemoteTranspiler::new(None).unwrap();
        let err = transpiler.transpile("const a = 1;").unwrap_err();
        assert_eq!(err.code.as_str(), "transpile.unavailable");
    }

    #[test]
    fn native_mode_requires_marker() {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path());
        assert_eq!(OutputMode::detect(true, &project), OutputMode::Transpiled);

        std::fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        assert_eq!(OutputMode::detect(true, &project), OutputMode::Native);
        assert_eq!(OutputMode::detect(false, &project), OutputMode::Transpiled);
        assert_eq!(OutputMode::Native.index_file_name(), "index.ts");
    }
}
