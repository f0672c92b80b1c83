use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flowboost", version, about = "FlowBoost CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive focus session (tasks, timer, celebrations)
    Session,
    /// Task breakdown suggestions
    Suggest {
        /// Task title
        title: String,
        /// Template category (general/writing/project/study/email/meeting)
        #[arg(long, default_value = "general", conflicts_with = "ai")]
        category: String,
        /// Use the hosted generative endpoint instead of templates
        #[arg(long)]
        ai: bool,
    },
    /// Preferences management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Session token management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Send feedback to the FlowBoost team
    Feedback {
        /// Feedback text
        text: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session => commands::session::run(),
        Commands::Suggest {
            title,
            category,
            ai,
        } => commands::suggest::run(&title, &category, ai),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Feedback { text } => commands::feedback::run(&text),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
