use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sajadah::app::AppContext;
use sajadah::cli::{commands, Cli, Commands};
use sajadah::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(cli.db, &config)?;

    match cli.command {
        Commands::Doa(args) => {
            commands::list_doas(&ctx, &args)?;
        }
        Commands::Hadith(args) => {
            commands::list_hadiths(&ctx, &args)?;
        }
        Commands::Categories { kind } => {
            commands::list_categories(&ctx, kind)?;
        }
        Commands::Schedule { lat, lon, date } => {
            commands::show_schedule(&ctx, lat, lon, date).await?;
        }
        Commands::City { name } => {
            commands::search_city(&ctx, &name.join(" ")).await?;
        }
        Commands::Calendar { year, month } => {
            commands::show_calendar(&ctx, year, month).await?;
        }
        Commands::Qibla { lat, lon } => {
            commands::show_qibla(&ctx, lat, lon).await?;
        }
        Commands::Tui { username } => {
            let session = match username {
                Some(username) => Some(commands::login(&ctx, &username)?),
                None => None,
            };
            sajadah::tui::run(Arc::new(ctx), Arc::new(config), session).await?;
        }
        Commands::Admin { username, action } => {
            let session = if action.requires_session() {
                let username = username.unwrap_or_else(|| config.admin.username.clone());
                Some(commands::login(&ctx, &username)?)
            } else {
                None
            };
            commands::admin(&ctx, session.as_ref(), action)?;
        }
    }

    Ok(())
}
