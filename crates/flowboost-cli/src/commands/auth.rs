use clap::Subcommand;
use flowboost_core::api::token_store;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the session token issued by the FlowBoost web app
    Login {
        /// Session token
        token: String,
    },
    /// Remove the stored session token
    Logout,
    /// Show sign-in state
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { token } => {
            token_store::store_session_token(&token)?;
            println!("signed in");
        }
        AuthAction::Logout => {
            token_store::clear_session_token()?;
            println!("signed out");
        }
        AuthAction::Status => match token_store::session_token() {
            Ok(Some(_)) => println!("signed in"),
            Ok(None) => println!("signed out"),
            Err(e) => {
                tracing::debug!(error = %e, "credential store unavailable");
                println!("signed out (credential store unavailable)");
            }
        },
    }
    Ok(())
}
