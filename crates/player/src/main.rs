//! Tianfa player - command-line composition root.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tianfa_player::runner::{
    self,
    config::{Command, RunnerConfig},
    RunnerDeps,
};

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tianfa_player=debug,tianfa_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = Command::from_args(std::env::args().skip(1)).map_err(anyhow::Error::msg)?;
    let config = RunnerConfig::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(
        variables_file = %config.variables_file.display(),
        message_id = ?config.message_id,
        "Starting Tianfa player"
    );

    let output = runner::run(RunnerDeps::from_config(&config), command)?;
    println!("{output}");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    // Load .env from the workspace root regardless of the current directory.
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");

    let _ = dotenvy::from_path(repo_root.join(".env.local"));
    let _ = dotenvy::from_path(repo_root.join(".env"));
}
