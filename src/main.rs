use anyhow::Context;
use clap::Parser;

use ana_chatbot::infrastructure::observability::init_tracing;
use ana_chatbot::presentation::{Cli, Environment, Settings, dispatch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings =
        Settings::load(environment, cli.config.as_deref()).context("loading settings")?;

    init_tracing(&settings.logging.tracing_config(environment));
    tracing::debug!(%environment, command = ?cli.command, "starting");

    dispatch(cli.command, &settings).await
}
