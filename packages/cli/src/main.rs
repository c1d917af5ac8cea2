mod config;
mod prompt;
mod render;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::backend::local::hash_password;
use client::{Collaborators, Dashboard, Directory, LoadError, Redirect};
use common::landing::landing_content;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use tracing::Level;

use crate::config::CliConfig;
use crate::prompt::TerminalNotifier;

#[derive(Parser, Debug)]
#[command(name = "directory")]
#[command(about = "Browse the company directory and manage your company profile")]
struct Cli {
    /// Config file; defaults to config/config.toml when present
    #[arg(long, env = "DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the landing page
    Landing,
    /// List companies, optionally filtered by name, sector or service
    Search { query: Option<String> },
    /// Show a company's public profile
    Profile { slug: String },
    /// Sign in and manage your company
    Dashboard {
        #[arg(long)]
        email: Option<String>,
    },
    /// Print an argon2 hash for a local seed account
    HashPassword,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn sign_in(backend: &Collaborators, email: Option<String>) -> Result<()> {
    if backend.auth.current_user().await?.is_some() {
        return Ok(());
    }
    let theme = ColorfulTheme::default();
    let email = match email {
        Some(email) => email,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;
    let user = backend
        .auth
        .sign_in(&email, &password)
        .await
        .context("sign in failed")?;
    println!("Signed in as {}.", user.email.as_deref().unwrap_or(user.id.as_str()));
    Ok(())
}

async fn dashboard(config: &CliConfig, backend: Collaborators, email: Option<String>) -> Result<()> {
    sign_in(&backend, email).await?;
    let notifier = Arc::new(TerminalNotifier::new());
    let dashboard = match Dashboard::load(
        backend,
        notifier,
        config.dashboard.clone(),
        &config.backend.bucket,
    )
    .await
    {
        Ok(dashboard) => dashboard,
        Err(e) => {
            match e.redirect() {
                Some(Redirect::Login) => eprintln!("Please sign in again."),
                Some(Redirect::Setup) => eprintln!(
                    "{} This account has no company yet. Create one to use the dashboard.",
                    style("!").yellow()
                ),
                None => {}
            }
            return match e {
                LoadError::Backend(e) => Err(e).context("could not load the dashboard"),
                _ => Ok(()),
            };
        }
    };
    shell::render_all(&dashboard);
    shell::run(dashboard).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::HashPassword = cli.command {
        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat", "Passwords do not match")
            .interact()?;
        println!("{}", hash_password(&password)?);
        return Ok(());
    }

    let config = CliConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let backend = Collaborators::from_config(&config.backend)
        .await
        .context("failed to set up the backend")?;

    match cli.command {
        Commands::Landing => render::landing(&landing_content()),
        Commands::Search { query } => {
            let directory = Directory::new(backend.tables.clone());
            let entries = match query.as_deref() {
                Some(query) => directory.search(query).await?,
                None => directory.entries().await?,
            };
            render::entries(&entries);
        }
        Commands::Profile { slug } => {
            let directory = Directory::new(backend.tables.clone());
            render::profile(&directory.profile(&slug).await?);
        }
        Commands::Dashboard { email } => dashboard(&config, backend, email).await?,
        Commands::HashPassword => {}
    }
    Ok(())
}
