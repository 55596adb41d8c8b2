use macro_analyzer_lib::config::Config;
use macro_analyzer_lib::core::cache::SeriesCache;
use macro_analyzer_lib::indicators::registry::Registry;
use macro_analyzer_lib::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config.log_level, &config.log_format);

    let cache = SeriesCache::open(&config.cache_dir)?;
    println!("Cache diagnostic - {}", cache.dir().display());

    println!("\n{:<10} | {:<8} | {:<28} | {:<10}", "Code", "Count", "Latest Date", "Latest Val");
    println!("{}", "-".repeat(66));

    for indicator in Registry::get_available_indicators() {
        match cache.try_load(&indicator.code) {
            Ok(Some(series)) if !series.is_empty() => {
                let Some(latest) = series.latest() else { continue };
                println!(
                    "{:<10} | {:<8} | {:<28} | {:.4}",
                    indicator.code,
                    series.len(),
                    latest.date.to_rfc3339(),
                    latest.value
                );
            }
            Ok(_) => println!("{:<10} | {:<8} | {:<28} | -", indicator.code, 0, "NO DATA"),
            Err(e) => println!("{:<10} | {:<8} | {:<28} | {:#}", indicator.code, "-", "UNREADABLE", e),
        }
    }

    println!("\nDone.");
    Ok(())
}
