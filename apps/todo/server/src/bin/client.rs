use clap::Parser;
use core_config::Environment;
use todo_server::client::{Args, run};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    core_config::tracing::install_color_eyre();
    core_config::tracing::init_tracing(&Environment::from_env());

    run(Args::parse()).await
}
