use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directory_core::{seed::demo_clients, ClientStore, DirectoryController, ToastQueue};
use shared::domain::{ClientId, NewClient};
use storage::Storage;
use tokio::runtime::Runtime;
use tracing::info;

mod backend_bridge;
mod config;
mod render;
mod shell;

use backend_bridge::runtime::{launch, PERSISTENCE_QUEUE_CAPACITY};
use backend_bridge::sink::ChannelSink;
use config::{load_settings, prepare_database_url, DEFAULT_CONFIG_FILE};
use shell::{Shell, ShellCommand};

#[derive(Parser, Debug)]
#[command(about = "Client directory for the invoicing dashboard")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides the configured database url.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the client table, optionally filtered.
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print one client's profile.
    Show { id: String },
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        company: String,
        /// Use this id instead of a generated one.
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a client. Without --yes only the confirmation prompt is shown.
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Interactive shell over stdin.
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(database_url) = cli.database_url {
        settings.database_url = database_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(io::stderr)
        .init();

    let database_url = prepare_database_url(&settings.database_url);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let storage = runtime.block_on(open_storage(&database_url, settings.seed_demo_data))?;
    let records = runtime.block_on(storage.load_clients())?;
    info!(clients = records.len(), %database_url, "loaded client directory");

    let store =
        ClientStore::from_records(records).context("stored clients cannot be loaded into the directory")?;
    let (sink, worker) = launch(
        runtime.handle().clone(),
        storage.clone(),
        PERSISTENCE_QUEUE_CAPACITY,
    );
    let toasts = ToastQueue::new();
    let mut shell = Shell::new(
        DirectoryController::with_sink(store, toasts.clone(), sink),
        toasts,
    );

    let result = run_command(&mut shell, &runtime, &storage, cli.command);

    // Closing the directory closes the persistence queue.
    drop(shell);
    let report = worker.finish()?;
    info!(
        applied = report.applied,
        failed = report.failed,
        "persistence worker drained"
    );
    result
}

async fn open_storage(database_url: &str, seed_demo_data: bool) -> Result<Storage> {
    let storage = Storage::new(database_url).await?;
    storage.health_check().await?;
    if seed_demo_data && storage.seed_if_empty(&demo_clients()).await? {
        info!("seeded demo clients");
    }
    Ok(storage)
}

fn run_command(
    shell: &mut Shell<ChannelSink>,
    runtime: &Runtime,
    storage: &Storage,
    command: Command,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::List { query, json } => {
            if let Some(query) = query {
                shell.execute(ShellCommand::Search(query), &mut io::sink())?;
            }
            if json {
                let snapshot = shell.directory().snapshot();
                serde_json::to_writer_pretty(&mut out, &snapshot)?;
                writeln!(out)?;
            } else {
                shell.execute(ShellCommand::List, &mut out)?;
            }
        }
        Command::Show { id } => {
            let id = ClientId::from(id);
            shell.execute(ShellCommand::Open(id.clone()), &mut out)?;
            if let Some(stored) = runtime.block_on(storage.get_client(&id))? {
                writeln!(
                    out,
                    "  since:    {}",
                    stored.created_at.format("%Y-%m-%d")
                )?;
            }
        }
        Command::Add {
            first_name,
            last_name,
            email,
            phone,
            company,
            id,
        } => {
            let mut new = NewClient::from_form(&first_name, &last_name, &email, &phone, &company);
            if let Some(id) = id {
                new = new.with_id(id);
            }
            let id = shell.submit_new_client(new, &mut out)??;
            writeln!(out, "created client {id}")?;
        }
        Command::Delete { id, yes } => {
            let id = ClientId::from(id);
            if yes {
                shell.delete_confirmed(&id, &mut out)?;
            } else if shell.request_delete(&id, &mut out)? {
                writeln!(out, "Re-run with --yes to delete.")?;
            }
        }
        Command::Shell => {
            let stdin = io::stdin();
            shell.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
