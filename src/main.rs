use std::fs;
use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};
use pagelift::config::Config;
use pagelift::constants::ERROR_NO_INPUT;
use pagelift::enhancer::Enhancer;
use pagelift::logger;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("init-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(path)?;
        return Ok(());
    }

    if args.is_empty() && std::io::stdin().is_terminal() {
        eprintln!("{}", ERROR_NO_INPUT);
        eprintln!("\n💡 To use this tool:");
        eprintln!("1. Pass a document path: pagelift page.html [output.html]");
        eprintln!("2. Or pipe a document in: curl -s https://example.org | pagelift");
        eprintln!("3. Run `pagelift init-config` to generate a default configuration");
        return Ok(());
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;

    // Read the rendered document
    let input = match args.first() {
        Some(path) if path != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input document: {}", path))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input document from stdin")?;
            buffer
        }
    };

    // One enhancement pass per invocation
    let enhancer = Enhancer::new(config)?;
    let page = enhancer.enhance(&input)?;

    log::info!(
        "enhanced page: {} absolute, {} relative, {} cache expiry, {} table(s)",
        page.summary.absolute,
        page.summary.relative,
        page.summary.cache_expiry,
        page.summary.tables
    );

    match args.get(1) {
        Some(path) => fs::write(path, &page.html)
            .with_context(|| format!("Failed to write output document: {}", path))?,
        None => print!("{}", page.html),
    }

    Ok(())
}
