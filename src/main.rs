use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::*;
use repovis::commands::{ApplyCommand, ListCommand, MenuCommand, SaveCommand};
use repovis::constants::{config::DEFAULT_CONFIG_FILE, exit};
use repovis::event_log::EventLog;
use repovis::prompt::{AssumeAnswer, DialoguerPrompter, Prompter};
use repovis::utils::check_dependencies;
use repovis::{Command, GhRemote, Session, Settings};

#[derive(Parser)]
#[command(name = "repovis")]
#[command(about = "Bulk-toggle visibility and archive status of your GitHub repositories")]
#[command(version)]
struct Cli {
    /// Settings file path
    #[arg(short, long, global = true, default_value_t = DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List repositories, optionally filtered by a keyword
    Ls {
        /// Case-sensitive substring of owner/name
        #[arg(short, long)]
        search: Option<String>,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Save the current inventory to a snapshot file
    Save {
        /// Snapshot file name, must end in .csv
        file: String,
    },

    /// Reconcile repositories with a snapshot file
    Apply {
        /// Snapshot file to apply
        file: String,

        /// Confirm every record without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(exit::FAILURE);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "repovis", &mut std::io::stdout());
        return Ok(());
    }

    let settings = Settings::load(&cli.config)?;
    if !settings.color {
        colored::control::set_override(false);
    }

    // Only the menu and an unconfirmed apply need a terminal
    let interactive = match &cli.command {
        None => true,
        Some(Commands::Apply { yes, .. }) => !yes,
        Some(_) => false,
    };
    if let Err(missing) = check_dependencies(&settings.gh_program, interactive) {
        eprintln!("{}", missing.to_string().red());
        std::process::exit(exit::MISSING_DEPENDENCY);
    }

    let prompter: Box<dyn Prompter> = match &cli.command {
        None | Some(Commands::Apply { yes: false, .. }) => Box::new(DialoguerPrompter),
        Some(Commands::Apply { yes: true, .. }) => Box::new(AssumeAnswer(true)),
        Some(_) => Box::new(AssumeAnswer(false)),
    };
    let events = match &settings.log_file {
        Some(path) => EventLog::new(path),
        None => EventLog::disabled(),
    };
    let remote = Box::new(GhRemote::from_settings(&settings));
    let mut session = Session::new(settings, remote, prompter, events);

    match cli.command {
        None => MenuCommand.execute(&mut session).await?,
        Some(Commands::Ls { search, json }) => {
            ListCommand {
                json,
                keyword: search,
            }
            .execute(&mut session)
            .await?
        }
        Some(Commands::Save { file }) => {
            SaveCommand { file: Some(file) }
                .execute(&mut session)
                .await?
        }
        Some(Commands::Apply { file, .. }) => {
            ApplyCommand { file: Some(file) }
                .execute(&mut session)
                .await?
        }
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}
