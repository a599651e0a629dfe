use std::io::{self, IsTerminal};
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, shells};
use owo_colors::OwoColorize;
use prodgen::commands::config::{self, ConfigArgs};
use prodgen::commands::generate::{self as generate_cmd, GenerateArgs, LONG_VERSION};

const ROOT_HELP_EXAMPLES: &str = "Examples:\n  prodgen generate --data-file item.json \"Сколько стоит?\"\n  echo \"Какой формат?\" | prodgen generate --field Формат=A4\n  prodgen config check\n  prodgen completion bash > ~/.local/share/bash-completion/completions/prodgen";

const GENERATE_HELP_EXAMPLES: &str = "Examples:\n  prodgen generate --data '{\"Артикул\":\"A-1\",\"Цена\":120}' \"Сколько стоит?\"\n  prodgen generate --field Артикул=A-1 --field РРЦ=null --dry-run \"Цена?\"\n  prodgen generate --api-url http://localhost:8080/v1/chat/completions --model llama --json \"Цена?\"";

#[derive(Debug, Parser)]
#[command(
    name = "prodgen",
    about = "Answer product questions with a chat-completions model",
    version,
    long_version = LONG_VERSION,
    after_help = ROOT_HELP_EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(
        about = "Generate an answer from a query and product data",
        after_help = GENERATE_HELP_EXAMPLES
    )]
    Generate(GenerateArgs),
    #[command(about = "Manage local config")]
    Config(ConfigArgs),
    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = Cli::command();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut cmd, "prodgen", &mut io::stdout()),
        CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, "prodgen", &mut io::stdout()),
        CompletionShell::Fish => generate(shells::Fish, &mut cmd, "prodgen", &mut io::stdout()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => generate_cmd::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        if io::stderr().is_terminal() {
            eprintln!("{} {err}", "error:".red().bold());
        } else {
            eprintln!("error: {err}");
        }
        process::exit(1);
    }
}
