use clap::Parser;
use dotenvy::dotenv;

use blockbuster::{
    cli::{Cli, Commands},
    commands::{
        handle_error, init_tracing, run_dashboard_command, run_schema_command, run_seed_command,
        stdout_sink,
    },
    config::{connect, resolve_database_url},
};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli).await.unwrap_or_else(handle_error);
}

async fn run(cli: Cli) -> blockbuster::Result<()> {
    let url = resolve_database_url(cli.database_url, cli.secrets.as_deref())?;
    let db = connect(url, cli.verbose).await?;

    match &cli.command {
        Commands::Schema => run_schema_command(&db).await?,
        Commands::Seed { create_schema, .. } => {
            let config = cli.command.generator_config().unwrap_or_default();
            run_seed_command(&db, config, *create_schema).await?;
        }
        Commands::Dashboard {
            limit,
            format,
            views,
            ..
        } => {
            let mut sink = stdout_sink(*format);
            let refresh = cli.command.refresh_interval();
            run_dashboard_command(&db, views, *limit, refresh, sink.as_mut()).await?;
        }
    }

    db.close().await?;
    Ok(())
}
