//! fevo-admin CLI entry point.

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fevo_client::cli::{Cli, Commands, OutputFormat};
use fevo_client::output::{format_output, json, pretty};
use fevo_client::storage::build_backends;
use fevo_client::sync::MirrorOutcome;
use fevo_client::{ClientConfig, Mutation, SourceSync};
use fevo_core::auth::AdminGate;
use fevo_core::sources::{default_sources, format_defaults_snippet, JobSource, SourceChanges};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "fevo_client=warn"
    } else {
        "fevo_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_cli(&cli)?;
    let password = match (cli.command.is_mutation(), config.password.as_deref()) {
        (true, None) => bail!("This command needs --password (or FEVO_PASSWORD)"),
        (_, password) => password,
    };

    let mut sync = SourceSync::load(
        build_backends(&config),
        AdminGate::new(config.gate_password()),
    )
    .await;

    let mutation = match cli.command {
        Commands::List => {
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&sync.sources(), cli.format)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_sources(sync.sources(), sync.origin()))
                }
            }
            return Ok(());
        }
        Commands::Export { snippet } => {
            if snippet {
                println!("{}", format_defaults_snippet(sync.sources()));
            } else {
                println!("{}", json::format_json_pretty(&sync.sources()));
            }
            return Ok(());
        }
        Commands::Add { name, url } => Mutation::Add { name, url },
        Commands::Edit { id, name, url } => {
            let changes = SourceChanges { name, url };
            if changes.is_empty() {
                bail!("Nothing to edit: pass --name and/or --url");
            }
            Mutation::Edit { id, changes }
        }
        Commands::Delete { id } => Mutation::Delete { id },
        Commands::Move { id, position } => Mutation::Move {
            id,
            to_index: position,
        },
        Commands::Import { file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let sources: Vec<JobSource> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a list of sources", file.display()))?;
            Mutation::Replace { sources }
        }
        Commands::Reset => Mutation::Replace {
            sources: default_sources(),
        },
    };

    sync.unlock(password.unwrap_or_default())?;

    let change = sync.apply(mutation).await?;
    match cli.format {
        OutputFormat::Json => println!("{}", format_output(&sync.sources(), cli.format)),
        OutputFormat::Pretty => {
            if !cli.quiet {
                println!("{}", pretty::format_change(&change))
            }
        }
    }

    if let Some(handle) = sync.mirror() {
        let kind = handle.kind();
        match sync
            .settle(handle)
            .await
            .with_context(|| format!("Failed to save to {kind} backend"))?
        {
            MirrorOutcome::Saved => {
                if !cli.quiet {
                    eprintln!("Saved to {kind} backend");
                }
            }
            MirrorOutcome::Skipped(e) => {
                eprintln!("Warning: {kind} backend was not updated: {e}");
            }
        }
    }

    sync.lock();
    Ok(())
}
