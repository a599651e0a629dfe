use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use prodgen::commands::generate::{self, GenerateArgs, LONG_VERSION};

#[derive(Debug, Parser)]
#[command(
    name = "prodask",
    about = "Ask a question about a product",
    version,
    long_version = LONG_VERSION
)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = generate::run(cli.generate).await {
        if io::stderr().is_terminal() {
            eprintln!("{} {err}", "error:".red().bold());
        } else {
            eprintln!("error: {err}");
        }
        process::exit(1);
    }
}
