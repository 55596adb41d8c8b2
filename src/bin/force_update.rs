use macro_analyzer_lib::config::Config;
use macro_analyzer_lib::logging::init_logging;
use macro_analyzer_lib::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config.log_level, &config.log_format);

    let app = AppContext::new(&config)?;

    println!("Refreshing every indicator from {}...", config.provider_base_url);
    let (success, failed) = app.fetcher.refresh_all().await;

    println!("Done. Refreshed {} indicators ({} failed)", success, failed);
    Ok(())
}
