use flowboost_core::suggest::{suggest_breakdown, GenerativeBreakdown};
use flowboost_core::{ApiClient, Config};

pub fn run(title: &str, category: &str, ai: bool) -> Result<(), Box<dyn std::error::Error>> {
    if ai {
        super::block_on(async {
            let config = Config::load_or_default();
            let api = ApiClient::from_config(&config)?;
            let outcome = GenerativeBreakdown::new(&api).suggest(title).await;
            if let Some(notice) = outcome.notice {
                eprintln!("{notice}");
            }
            print_steps(&outcome.steps);
            Ok(())
        })
    } else {
        print_steps(&suggest_breakdown(title, category));
        Ok(())
    }
}

fn print_steps(steps: &[String]) {
    for (i, step) in steps.iter().enumerate() {
        println!("{}. {step}", i + 1);
    }
}
