use clap::Subcommand;
use flowboost_core::{ApiClient, Config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a preference value
    Get {
        /// Preference key (e.g. "session.focus_minutes")
        key: String,
    },
    /// Set a preference value
    Set {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },
    /// List all preferences
    List,
    /// Reset preferences to defaults
    Reset,
    /// Overwrite local preferences with the server copy
    Pull,
    /// Overwrite the server copy with local preferences
    Push,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load_or_default();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("preferences reset to defaults");
        }
        ConfigAction::Pull => {
            super::block_on(async {
                let mut config = Config::load_or_default();
                let api = ApiClient::from_config(&config)?;
                let payload = api.fetch_preferences().await?;
                config.apply_payload(&payload);
                config.validate()?;
                config.save()?;
                println!("preferences pulled");
                Ok(())
            })?;
        }
        ConfigAction::Push => {
            super::block_on(async {
                let config = Config::load_or_default();
                let api = ApiClient::from_config(&config)?;
                api.save_preferences(&config.to_payload()).await?;
                println!("preferences pushed");
                Ok(())
            })?;
        }
    }
    Ok(())
}
