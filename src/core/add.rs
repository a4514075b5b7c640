//! The add pipeline: merge options, then resolve, transform and materialize
//! each requested utility in order.
//!
//! Names are processed strictly one after another so index appends never
//! race. A failure on one name is recorded in its result and the loop moves
//! on; only argument errors abort the run before anything is written.

use serde::Serialize;
use std::path::PathBuf;

use crate::cancel::CancelFlag;
use crate::config::{self, CliFlags, EffectiveOptions, OverrideSet};
use crate::error::Result;
use crate::materialize::{self, Target};
use crate::output::{MaterializationResult, MaterializationStatus, RunSummary};
use crate::project::Project;
use crate::registry::SourceResolver;
use crate::transpile::{self, OutputMode, Transpiler};
use crate::utils::validation;

/// One `add` invocation as parsed from the command line.
#[derive(Debug, Clone)]
pub struct AddRequest {
    pub names: Vec<String>,
    pub flags: CliFlags,
    pub overrides: OverrideSet,
}

/// External services the pipeline talks to.
pub struct Pipeline<'a> {
    pub resolver: &'a dyn SourceResolver,
    pub transpiler: &'a dyn Transpiler,
    pub cancel: &'a CancelFlag,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOutput {
    pub command: &'static str,
    pub options: EffectiveOptions,
    pub mode: OutputMode,
    pub output_dir: PathBuf,
    pub results: Vec<MaterializationResult>,
    pub summary: RunSummary,
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AddOutput {
    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }
}

pub fn run(project: &Project, request: AddRequest, pipeline: &Pipeline<'_>) -> Result<AddOutput> {
    let names = validate_names(&request.names)?;
    let mut warnings = Vec::new();

    let persisted = match config::load(project) {
        Ok(persisted) => persisted,
        Err(err) => {
            log_status!("add", "{} Falling back to command-line options.", err.summary());
            warnings.push(err.summary());
            None
        }
    };

    let options = config::merge(&request.flags, request.overrides, persisted.as_ref());
    let target = Target {
        dir: options
            .output_directory
            .as_ref()
            .map(|dir| project.resolve_path(&dir.to_string_lossy()))
            .unwrap_or_else(|| project.default_output_dir()),
        mode: OutputMode::detect(options.use_native_language, project),
    };

    let mut results = Vec::with_capacity(names.len());
    let mut cancelled = false;

    for name in &names {
        if pipeline.cancel.is_cancelled() {
            cancelled = true;
            break;
        }

        let result = add_one(name, &options, &target, pipeline);
        report(&result, options.silent);
        results.push(result);
    }

    let summary = RunSummary::from_results(&results);
    if !options.silent && summary.total > 1 && summary.is_success() && !cancelled {
        log_status!("add", "All utils have been added successfully.");
    }

    Ok(AddOutput {
        command: "add",
        mode: target.mode,
        output_dir: target.dir,
        options,
        results,
        summary,
        cancelled,
        warnings,
    })
}

/// Validate every name up front and drop repeats, keeping first positions.
fn validate_names(names: &[String]) -> Result<Vec<String>> {
    validation::require_non_empty_vec(names, "utils")?;

    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        validation::require_utility_name(name)?;
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    Ok(unique)
}

fn add_one(
    name: &str,
    options: &EffectiveOptions,
    target: &Target,
    pipeline: &Pipeline<'_>,
) -> MaterializationResult {
    let output_path = target.output_path(name);

    let source = match pipeline.resolver.resolve(name) {
        Ok(source) => source,
        Err(err) => return MaterializationResult::failed(name, output_path, err.summary()),
    };

    let transformed = transpile::select(source, target.mode, pipeline.transpiler);
    let warnings: Vec<String> = transformed
        .warning
        .map(|err| {
            log_status!("add", "{}; using untranspiled source for {}", err.summary(), name);
            err.summary()
        })
        .into_iter()
        .collect();

    match materialize::materialize(name, &transformed.text, options, target) {
        Ok(done) => MaterializationResult {
            name: name.to_string(),
            output_path: done.output_path,
            status: done.status,
            index: done.index,
            warnings,
        },
        Err(err) => {
            let mut failed = MaterializationResult::failed(name, output_path, err.summary());
            failed.warnings = warnings;
            failed
        }
    }
}

fn report(result: &MaterializationResult, silent: bool) {
    match &result.status {
        MaterializationStatus::Failed { reason } => {
            log_status!("add", "Failed to add {}: {}", result.name, reason);
        }
        MaterializationStatus::Written | MaterializationStatus::Overwritten if !silent => {
            log_status!(
                "add",
                "Util {} has been added to {}",
                result.name,
                result.output_path.display()
            );
        }
        _ => {}
    }
}
