use clap::Parser;
use gigfinder_client::cli::{self, output::Output, Cli};
use gigfinder_client::config::Config;
use gigfinder_client::error::Error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Cli::parse();
    let out = Output::new(args.json);

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => match args.api_url.as_deref() {
            Some(url) => Config::new(url)?,
            None => return Err(e.into()),
        },
    };
    if let Some(url) = args.api_url.as_deref() {
        config.api_base_url = url::Url::parse(url)?;
    }

    if let Err(e) = cli::commands::run(args, config).await {
        out.error(&describe(&e));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gigfinder_client=info,gigfinder=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// One line per failure, with a hint when retrying may help.
fn describe(e: &anyhow::Error) -> String {
    match e.downcast_ref::<Error>() {
        Some(Error::Unauthorized(_)) => format!("{} (sign in again)", e),
        Some(err) if err.is_retriable() => format!("{} (temporary, try again)", e),
        _ => format!("{:#}", e),
    }
}
