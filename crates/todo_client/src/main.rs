use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use todo_client::{TodoApi, TodoSession, api::DEFAULT_BASE_URL, view};

#[derive(Parser)]
#[command(author, version, about = "Manage todos on a running todo service")]
struct Cli {
    /// Base URL of the API, including the `/api` prefix
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show active and completed todos
    List,
    /// Create a todo
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Replace the title and description of a todo
    Edit {
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Flip a todo between active and completed
    Toggle { id: Uuid },
    /// Delete a todo after confirmation
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut session = TodoSession::new(TodoApi::new(&cli.base_url));
    session.load().await;

    match cli.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Add { title, description } => {
            session.set_title(title);
            session.set_description(description);
            session.create().await;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            ensure_loaded(&session, id)?;
            session.begin_edit(id);
            session.set_edit_title(title);
            session.set_edit_description(description);
            session.commit_edit().await;
        }
        Command::Toggle { id } => {
            ensure_loaded(&session, id)?;
            session.toggle(id).await;
        }
        Command::Delete { id, yes } => {
            if yes {
                session.delete(id, &mut |_: &str| true).await;
            } else {
                session.delete(id, &mut prompt_stdin).await;
            }
        }
    }

    let state = session.snapshot();
    print!("{}", view::render(&state));
    if state.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}

fn ensure_loaded(session: &TodoSession<TodoApi>, id: Uuid) -> anyhow::Result<()> {
    let state = session.snapshot();
    if state.error.is_none() && state.find(id).is_none() {
        anyhow::bail!("no todo with id {id}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn prompt_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
