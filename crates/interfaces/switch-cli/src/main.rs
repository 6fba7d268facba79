use clap::{Parser, Subcommand};
use switch_app_core::{ActionContext, ProfileManager};
use switch_cli::commands::{self, OpenRequest};
use switch_cli::{init_tracing, profiles};
use switch_core::{ActionKind, Profile};
use switch_persistence::FilePersistence;

#[derive(Parser)]
#[command(author, version, about = "Open files and projects in external editors")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage editor profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Open a file at a position in an editor
    #[command(name = "open-file")]
    OpenFile {
        #[arg(short, long)]
        profile: String,
        file: String,
        #[arg(long, default_value_t = 1)]
        line: u32,
        #[arg(long, default_value_t = 1)]
        column: u32,
        #[arg(long, help = "Project root; defaults to the current directory")]
        project: Option<String>,
        #[arg(long, help = "Use the lightweight window activation")]
        quick: bool,
        #[arg(long, help = "Print the command instead of running it")]
        dry_run: bool,
    },
    /// Open a project directory in an editor
    #[command(name = "open-project")]
    OpenProject {
        #[arg(short, long)]
        profile: String,
        path: String,
        #[arg(long, help = "Use the lightweight window activation")]
        quick: bool,
        #[arg(long, help = "Print the command instead of running it")]
        dry_run: bool,
    },
    /// Show the commands, menus and shortcuts the saved profiles produce
    Reconcile,
    /// Print the canonical form of a shortcut
    Shortcut {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    List,
    Add {
        #[arg(long, help = "Unique slug ID for the profile")]
        id: String,
        name: String,
        executable: String,
        #[arg(long, default_value = "")]
        file_shortcut: String,
        #[arg(long, default_value = "")]
        project_shortcut: String,
        #[arg(long)]
        file_args: Option<String>,
        #[arg(long)]
        project_args: Option<String>,
        #[arg(long, help = "Open files through <prefix>file<path> on macOS")]
        protocol_prefix: Option<String>,
        #[arg(long)]
        disabled: bool,
    },
    Remove {
        id: String,
    },
    Enable {
        id: String,
    },
    Disable {
        id: String,
    },
    /// Replace all profiles with the built-in editors
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let store = FilePersistence::new();

    match cli.command {
        Commands::Profile { command } => {
            let mgr = ProfileManager::new(store);
            match command {
                ProfileCommands::List => profiles::handle_list(&mgr)?,
                ProfileCommands::Add {
                    id,
                    name,
                    executable,
                    file_shortcut,
                    project_shortcut,
                    file_args,
                    project_args,
                    protocol_prefix,
                    disabled,
                } => {
                    let defaults = Profile::default();
                    let profile = Profile {
                        id,
                        display_name: name,
                        executable_path: executable,
                        enabled: !disabled,
                        open_file_shortcut: file_shortcut,
                        open_project_shortcut: project_shortcut,
                        open_file_args_template: file_args
                            .unwrap_or(defaults.open_file_args_template),
                        open_project_args_template: project_args
                            .unwrap_or(defaults.open_project_args_template),
                        use_custom_protocol: protocol_prefix.is_some(),
                        protocol_prefix: protocol_prefix.unwrap_or_default(),
                    };
                    profiles::handle_add(&mgr, profile)?
                }
                ProfileCommands::Remove { id } => profiles::handle_remove(&mgr, &id)?,
                ProfileCommands::Enable { id } => profiles::handle_set_enabled(&mgr, &id, true)?,
                ProfileCommands::Disable { id } => {
                    profiles::handle_set_enabled(&mgr, &id, false)?
                }
                ProfileCommands::Reset => profiles::handle_reset(&mgr)?,
            }
        }
        Commands::OpenFile {
            profile,
            file,
            line,
            column,
            project,
            quick,
            dry_run,
        } => {
            let project = match project {
                Some(p) => p,
                None => std::env::current_dir()?.to_string_lossy().into_owned(),
            };
            let request = OpenRequest {
                kind: ActionKind::OpenFile,
                profile_id: profile,
                context: ActionContext::for_file(&project, &file).at(line, column),
                quick,
                dry_run,
            };
            commands::cmd_open(&store, request).await?;
        }
        Commands::OpenProject {
            profile,
            path,
            quick,
            dry_run,
        } => {
            let request = OpenRequest {
                kind: ActionKind::OpenProject,
                profile_id: profile,
                context: ActionContext::for_project(&path),
                quick,
                dry_run,
            };
            commands::cmd_open(&store, request).await?;
        }
        Commands::Reconcile => commands::cmd_reconcile(&store)?,
        Commands::Shortcut { text } => commands::cmd_shortcut(&text)?,
    }

    Ok(())
}
