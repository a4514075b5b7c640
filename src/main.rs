use clap::{Parser, Subcommand};

use commands::GlobalArgs;
use youtools::cancel::CancelFlag;

mod commands;
mod output;
mod tty;

use commands::{add, init};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "youtools")]
#[command(version = VERSION)]
#[command(about = "Add utils to your project without creating a load of dependencies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Init a default youtools config in your project
    Init(init::InitArgs),
    /// Add utils to your project
    Add(add::AddArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let cancel = CancelFlag::new();
    if let Err(err) = cancel.install_signal_handler() {
        tty::status(&err.summary());
    }
    let global = GlobalArgs { cancel };

    tty::status("youtools is working...");
    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    output::print_json_result(json_result, exit_code);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
