use clap::Args;

use youtools::add::{self, AddOutput, AddRequest, Pipeline};
use youtools::project::Project;
use youtools::registry;
use youtools::transpile::RemoteTranspiler;

use super::{CmdResult, GlobalArgs, OptionFlags};

#[derive(Args)]
pub struct AddArgs {
    /// The utils to add
    #[arg(value_name = "UTILS")]
    pub utils: Vec<String>,

    #[command(flatten)]
    pub options: OptionFlags,
}

pub fn run(args: AddArgs, global: &GlobalArgs) -> CmdResult<AddOutput> {
    let project = Project::current()?;
    let resolver = registry::default_resolver()?;
    let transpiler = RemoteTranspiler::from_env()?;

    let request = AddRequest {
        names: args.utils,
        flags: args.options.to_cli_flags(),
        overrides: args.options.overrides(),
    };
    let pipeline = Pipeline {
        resolver: resolver.as_ref(),
        transpiler: &transpiler,
        cancel: &global.cancel,
    };

    let output = add::run(&project, request, &pipeline)?;
    let exit_code = if output.is_success() { 0 } else { 1 };

    Ok((output, exit_code))
}
