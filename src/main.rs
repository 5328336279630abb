use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod term;

#[derive(Parser)]
#[command(name = "axe")]
#[command(about = "Interpreter for a calculator flavored subset of Axe", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run one stage of the pipeline on its own
    #[arg(long, value_enum, global = true)]
    test: Option<term::Component>,

    /// Keybinding file, `NAME : code` per line
    #[arg(long, value_name = "PATH", global = true)]
    keys: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program file
    Run {
        /// Source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let file = match cli.command {
        Some(Commands::Run { file }) => Some(file),
        None => None,
    };
    let code = term::main(term::Options {
        file,
        test: cli.test,
        keys: cli.keys,
    });
    std::process::exit(code);
}
