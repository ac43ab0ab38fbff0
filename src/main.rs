use anyhow::Context;
use clap::Parser;
use mensa_feed::domain::ports::SourceProfile;
use mensa_feed::utils::{logger, validation::Validate};
use mensa_feed::{CliConfig, ConversionEngine, LocalStorage};

fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        eprintln!("Fail: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    config.validate()?;

    let profile = config.load_profile().with_context(|| match &config.profile_file {
        Some(path) => format!("loading profile {}", path.display()),
        None => "loading built-in profile".to_string(),
    })?;
    profile.validate()?;
    tracing::info!("🔍 Using profile {}", profile.name());

    let storage = LocalStorage::new(config.output.clone());
    let engine = ConversionEngine::new(profile, config.settings(), storage);

    // the output writer is dropped inside run, so partial feeds are flushed
    engine.run(&config.file)?;
    Ok(())
}
