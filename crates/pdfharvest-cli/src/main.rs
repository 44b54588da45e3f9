mod cli;
mod extract_cmd;
mod runs_cmd;
mod sections_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Extract {
            ref file,
            ref schema,
            ref strategy,
            pretty,
            ref password,
        } => extract_cmd::run(file, schema, strategy, pretty, password.as_deref()),
        cli::Commands::Runs {
            ref file,
            page,
            ref password,
        } => runs_cmd::run(file, page, password.as_deref()),
        cli::Commands::Sections {
            ref file,
            ref schema,
            ref password,
        } => sections_cmd::run(file, schema, password.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
