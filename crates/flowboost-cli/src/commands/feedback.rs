use flowboost_core::{ApiClient, Config};

pub fn run(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    super::block_on(async {
        let config = Config::load_or_default();
        let api = ApiClient::from_config(&config)?;
        api.send_feedback(text).await?;
        println!("thanks for the feedback!");
        Ok(())
    })
}
