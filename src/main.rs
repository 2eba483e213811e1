mod bridge;
mod cli;
mod config;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use cssloader_browse::SortOrder;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cssloader")]
#[command(author, version, about = "Browse the CSS Loader theme catalog and installed themes")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(long, global = true, help = "Plugin data directory (default: ~/homebrew)")]
    data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Config file (default: ~/.config/cssloader/config.toml)")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Detailed logging")]
    verbose: bool,

    #[arg(long, value_enum, help = "Generate shell completions")]
    completions: Option<ShellCompletion>,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog themes with their install status
    Browse {
        #[arg(short, long, default_value = "", help = "Filter by theme name")]
        search: String,

        #[arg(long, value_enum, help = "Sort order (default: from config, else name-asc)")]
        sort: Option<SortArg>,

        #[arg(short, long, help = "Only show themes for this target")]
        target: Option<String>,

        #[arg(long, help = "Print the available targets instead of themes")]
        list_targets: bool,
    },
    /// List installed themes
    Installed {
        #[arg(long, value_name = "TARGET", help = "Print the generated stylesheet for a target")]
        stylesheet: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    NameAsc,
    NameDesc,
    DateNewest,
    DateOldest,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::NameAsc => SortOrder::NameAsc,
            SortArg::NameDesc => SortOrder::NameDesc,
            SortArg::DateNewest => SortOrder::DateNewest,
            SortArg::DateOldest => SortOrder::DateOldest,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum ShellCompletion {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let shell = match shell {
            ShellCompletion::Bash => Shell::Bash,
            ShellCompletion::Zsh => Shell::Zsh,
            ShellCompletion::Fish => Shell::Fish,
            ShellCompletion::Powershell => Shell::PowerShell,
        };
        generate(shell, &mut Args::command(), "cssloader", &mut io::stdout());
        return Ok(());
    }

    let (config, config_path) = config::load(args.config.as_deref())?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.log_level.as_deref().unwrap_or("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Some(path) = config_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir());

    match args.command {
        Some(Command::Browse {
            search,
            sort,
            target,
            list_targets,
        }) => cli::browse(data_dir, cli::BrowseArgs {
            search,
            sort: sort.map(SortOrder::from).unwrap_or(config.default_sort),
            target,
            list_targets,
        }),
        Some(Command::Installed { stylesheet }) => {
            cli::installed(data_dir, cli::InstalledArgs { stylesheet })
        }
        None => {
            eprintln!("Usage: cssloader <browse|installed> [OPTIONS]");
            eprintln!("       cssloader --help for more information");
            std::process::exit(1);
        }
    }
}
