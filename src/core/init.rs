use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{CliFlags, PersistedConfig};
use crate::error::{Error, Result};
use crate::project::Project;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOutput {
    pub command: &'static str,
    pub path: PathBuf,
    pub config: PersistedConfig,
}

/// Write `youtools.json` from the given flags. Never replaces an existing file.
///
/// TypeScript output is only recorded when the project has a tsconfig.json.
pub fn run(project: &Project, flags: &CliFlags) -> Result<InitOutput> {
    let path = project.config_path();
    let display = path.display().to_string();

    if path.exists() {
        return Err(Error::config_already_exists(display));
    }

    let mut config = PersistedConfig::from_flags(flags);
    config.typescript = config.typescript && project.has_typescript_marker();
    config
        .validate()
        .map_err(|problem| Error::validation_invalid_argument("path", problem, None))?;

    let content = serde_json::to_string_pretty(&config)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize config".to_string())))?;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                Error::config_already_exists(display.clone())
            } else {
                Error::write_failed(display.clone(), e.to_string())
            }
        })?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::write_failed(display, e.to_string()))?;

    if !config.silent {
        log_status!("init", "Created configuration file {}", path.display());
    }

    Ok(InitOutput {
        command: "init",
        path,
        config,
    })
}
