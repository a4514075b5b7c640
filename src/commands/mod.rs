use clap::Args;

use youtools::cancel::CancelFlag;
use youtools::config::{self, CliFlags, OptionKey, OverrideSet};

pub type CmdResult<T> = youtools::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub cancel: CancelFlag,
}

/// Option flags shared by `init` and `add`.
///
/// Every flag is optional so that typed flags can be told apart from
/// defaults. Boolean flags take `--flag <bool>` or `--flag=<bool>`; a bare
/// `--flag` with no value after it means true. A token after a boolean flag
/// is always read as its value, so `--overwrite debounce` is a usage error
/// rather than a silent `true` plus a utility name.
#[derive(Args, Default, Debug)]
pub struct OptionFlags {
    /// Use TypeScript (tsconfig.json should exist in the project) [default: true]
    #[arg(
        short = 't',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    pub typescript: Option<bool>,

    /// Overwrite existing files [default: false]
    #[arg(
        short = 'o',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    pub overwrite: Option<bool>,

    /// Append to the utils index file [default: true]
    #[arg(
        short = 'a',
        long = "appendToIndex",
        visible_alias = "append-to-index",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    pub append_to_index: Option<bool>,

    /// The path to add the utils to [default: lib/utils]
    #[arg(short = 'p', long, value_name = "PATH")]
    pub path: Option<String>,

    /// Mute progress output [default: false]
    #[arg(
        short = 's',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_bool_flag
    )]
    pub silent: Option<bool>,
}

impl OptionFlags {
    /// Keys the user typed on this invocation.
    pub fn overrides(&self) -> OverrideSet {
        let typed = [
            (OptionKey::Typescript, self.typescript.is_some()),
            (OptionKey::Overwrite, self.overwrite.is_some()),
            (OptionKey::AppendToIndex, self.append_to_index.is_some()),
            (OptionKey::Path, self.path.is_some()),
            (OptionKey::Silent, self.silent.is_some()),
        ];
        typed
            .into_iter()
            .filter_map(|(key, present)| present.then_some(key))
            .collect()
    }

    /// Flag values with defaults filled in for anything not typed.
    pub fn to_cli_flags(&self) -> CliFlags {
        let defaults = CliFlags::default();
        CliFlags {
            typescript: self.typescript.unwrap_or(defaults.typescript),
            overwrite: self.overwrite.unwrap_or(defaults.overwrite),
            append_to_index: self.append_to_index.unwrap_or(defaults.append_to_index),
            path: self.path.clone(),
            silent: self.silent.unwrap_or(defaults.silent),
        }
    }
}

fn parse_bool_flag(value: &str) -> Result<bool, String> {
    config::parse_bool(value).ok_or_else(|| format!("expected a boolean (true/false), got '{}'", value))
}

pub mod add;
pub mod init;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (youtools::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Init(args) => dispatch!(args, init),
        crate::Commands::Add(args) => dispatch!(args, global, add),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        options: OptionFlags,
        names: Vec<String>,
    }

    fn parse(args: &[&str]) -> Harness {
        Harness::try_parse_from(std::iter::once("youtools").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn untyped_flags_are_not_overrides() {
        let harness = parse(&["debounce"]);
        assert!(harness.options.overrides().is_empty());
        assert_eq!(harness.options.to_cli_flags(), CliFlags::default());
    }

    #[test]
    fn typed_default_values_still_count_as_overrides() {
        let harness = parse(&["--overwrite=false", "--path=lib/utils", "debounce"]);
        let overrides = harness.options.overrides();

        assert!(overrides.contains(OptionKey::Overwrite));
        assert!(overrides.contains(OptionKey::Path));
        assert!(!overrides.contains(OptionKey::Typescript));
        assert!(!harness.options.to_cli_flags().overwrite);
        assert_eq!(harness.names, vec!["debounce".to_string()]);
    }

    #[test]
    fn space_separated_bool_is_the_flag_value() {
        let harness = parse(&["debounce", "--overwrite", "false"]);

        assert!(!harness.options.to_cli_flags().overwrite);
        assert!(harness.options.overrides().contains(OptionKey::Overwrite));
        assert_eq!(harness.names, vec!["debounce".to_string()]);
    }

    #[test]
    fn short_flags_take_space_separated_values() {
        let harness = parse(&["-t", "no", "-s", "true", "debounce", "capitalize"]);
        let flags = harness.options.to_cli_flags();

        assert!(!flags.typescript);
        assert!(flags.silent);
        assert_eq!(
            harness.names,
            vec!["debounce".to_string(), "capitalize".to_string()]
        );
    }

    #[test]
    fn trailing_bare_flag_means_true() {
        let harness = parse(&["debounce", "--silent", "-o"]);
        let flags = harness.options.to_cli_flags();

        assert!(flags.silent);
        assert!(flags.overwrite);
        assert_eq!(harness.names, vec!["debounce".to_string()]);
    }

    #[test]
    fn bare_flag_before_next_flag_means_true() {
        let harness = parse(&["--silent", "--path", "src/helpers", "debounce"]);

        assert!(harness.options.to_cli_flags().silent);
        assert_eq!(harness.options.path.as_deref(), Some("src/helpers"));
        assert_eq!(harness.names, vec!["debounce".to_string()]);
    }

    #[test]
    fn name_after_bool_flag_is_rejected_not_swallowed() {
        for args in [["--overwrite", "debounce"], ["-s", "debounce"]] {
            let result = Harness::try_parse_from(std::iter::once("youtools").chain(args));
            assert!(result.is_err(), "{:?}", args);
        }
    }

    #[test]
    fn camel_case_append_flag_is_accepted() {
        let harness = parse(&["--appendToIndex=false", "x"]);
        assert!(!harness.options.to_cli_flags().append_to_index);
        assert!(harness.options.overrides().contains(OptionKey::AppendToIndex));
    }

    #[test]
    fn invalid_bool_is_a_usage_error() {
        let result = Harness::try_parse_from(["youtools", "--typescript=perhaps"]);
        assert!(result.is_err());
    }
}
