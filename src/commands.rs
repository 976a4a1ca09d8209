use sea_orm::{ConnectionTrait, TransactionTrait};
use std::{fmt::Display, io, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{
    cli::OutputFormat,
    generator::{GenerationSummary, Generator, GeneratorConfig},
    report::{self, ChartSink, JsonSink, TextSink, View},
    schema, Result,
};

/// Install the global subscriber. Quiet mode prints bare messages from this
/// crate only; verbose mode shows everything at debug, SQL included.
pub fn init_tracing(verbose: bool) {
    let filter = match verbose {
        true => "debug",
        false => "blockbuster=info",
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_level(false)
            .without_time();
        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    }
}

pub async fn run_schema_command<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    schema::create_tables(db).await?;
    println!("Schema is up to date");
    Ok(())
}

pub async fn run_seed_command<C>(
    db: &C,
    config: GeneratorConfig,
    create_schema: bool,
) -> Result<GenerationSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    if create_schema {
        schema::create_tables(db).await?;
    }

    let records = config.record_count;
    let summary = Generator::new(config).run(db).await?;
    println!("Database populated with {records} records successfully!");
    println!("{summary}");
    Ok(summary)
}

/// Sink for `format`, writing to stdout.
pub fn stdout_sink(format: OutputFormat) -> Box<dyn ChartSink> {
    match format {
        OutputFormat::Text => Box::new(TextSink::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonSink::new(io::stdout())),
    }
}

/// Render `views` (all of them when empty) once, or every `refresh` until
/// Ctrl-C.
pub async fn run_dashboard_command<C, S>(
    db: &C,
    views: &[View],
    limit: u64,
    refresh: Option<Duration>,
    sink: &mut S,
) -> Result<()>
where
    C: ConnectionTrait,
    S: ChartSink + ?Sized,
{
    let views = if views.is_empty() {
        &View::ALL[..]
    } else {
        views
    };

    loop {
        let report = report::render_views(db, views, limit, sink).await?;
        if !report.is_complete() {
            warn!(
                failed = report.failed.len(),
                "some views could not be loaded"
            );
        }

        let Some(every) = refresh else {
            return Ok(());
        };
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                info!("Dashboard stopped");
                return Ok(());
            }
            _ = tokio::time::sleep(every) => {}
        }
    }
}

pub fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    ::std::process::exit(1);
}
