// src/main.rs

use simcli::settings::Settings;
use simcli::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("simcli error: {err:#}");
            1
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    let settings = Settings::from_env();
    logging::init_logging(settings.log_level)?;
    Ok(run(&settings, &args.invocation()).await?)
}
