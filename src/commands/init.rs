use clap::Args;

use youtools::init::{self, InitOutput};
use youtools::project::Project;

use super::{CmdResult, OptionFlags};

#[derive(Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub options: OptionFlags,
}

pub fn run_json(args: InitArgs) -> CmdResult<InitOutput> {
    let project = Project::current()?;
    let output = init::run(&project, &args.options.to_cli_flags())?;
    Ok((output, 0))
}
