use clap::Parser;
use kiwy_hq::cli::{Cli, Commands, CredsAction, SecretsAction, StatusAction};
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; RUST_LOG=debug shows store activity.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Secrets { ref action } => match action {
            SecretsAction::Show => kiwy_hq::cli::commands::secrets::show(&cli),
            SecretsAction::Set { field, value } => {
                kiwy_hq::cli::commands::secrets::set(&cli, field, value.as_deref())
            }
            SecretsAction::Clear { field } => kiwy_hq::cli::commands::secrets::clear(&cli, field),
        },
        Commands::Creds { ref action } => match action {
            CredsAction::List => kiwy_hq::cli::commands::creds::list(&cli),
            CredsAction::Set { key, label, value } => {
                kiwy_hq::cli::commands::creds::set(&cli, key, label, value.as_deref())
            }
            CredsAction::Clear { key } => kiwy_hq::cli::commands::creds::clear(&cli, key),
            CredsAction::Import => kiwy_hq::cli::commands::creds::import(&cli),
        },
        Commands::Status { ref action } => match action {
            StatusAction::Show => kiwy_hq::cli::commands::status::show(&cli),
            StatusAction::Set { project, sentence } => {
                kiwy_hq::cli::commands::status::set(&cli, project, sentence)
            }
        },
    };

    if let Err(e) = result {
        kiwy_hq::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
