mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use cli::{AdminCommand, Cli, Commands, ProCommand, ServicesCommand};
use homeman::{
    dtos::ServiceListingDto,
    handler::{self, admin::DirectoryChange, auth::RegisterInput, PageError, PageResult},
    service::admin_service::AdminAction,
    session::FileSessionStore,
    AppState, Config, SessionContext,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenv().ok();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("🔥 {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// `-v` flags win over `RUST_LOG`; with neither, only warnings are shown.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    match rust_log.filter(|directives| verbose == 0 && !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        None => EnvFilter::new(level.to_string()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::init();
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }

    let store = FileSessionStore::new(&config.session_file);
    let session = SessionContext::new(store).context("Failed to read the stored session")?;
    let app_state = AppState::new(config, session).context("Failed to build the HTTP client")?;

    let command = cli.command.unwrap_or(Commands::Home);
    let result = dispatch(&app_state, command).await;
    Ok(report(result))
}

async fn dispatch(app_state: &AppState, command: Commands) -> PageResult {
    match command {
        Commands::Home => handler::home(app_state),
        Commands::Login { email, password } => handler::auth::login(app_state, email, password).await,
        Commands::Register {
            name,
            email,
            password,
            role,
            phone,
            location,
            skill,
        } => {
            let input = RegisterInput {
                name,
                email,
                password,
                role,
                phone,
                location,
                skill,
            };
            handler::auth::register(app_state, input).await
        }
        Commands::Logout => handler::auth::logout(app_state),
        Commands::Pros { skill } => handler::client::client_home(app_state, skill.as_deref()).await,
        Commands::Hire { pro_id, skill } => handler::client::hire(app_state, &pro_id, skill.as_deref()).await,
        Commands::Rate { pro_id, value } => handler::client::rate(app_state, &pro_id, value).await,
        Commands::Watch => {
            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            handler::watch::watch(app_state, None, shutdown, |line| println!("{}", line))
                .await
                .map(|exit| format!("Stopped watching ({:?})", exit))
        }
        Commands::Pro { command } => match command {
            ProCommand::Dashboard => handler::pro::dashboard(app_state).await,
            ProCommand::Accept { booking_id } => handler::pro::accept(app_state, &booking_id).await,
            ProCommand::Decline { booking_id } => handler::pro::decline(app_state, &booking_id).await,
        },
        Commands::Admin { command } => match command {
            AdminCommand::Dashboard { search } => handler::admin::dashboard(app_state, search.as_deref()).await,
            AdminCommand::Verify { pro_id } => {
                handler::admin::act(app_state, AdminAction::Verify, &pro_id, false).await
            }
            AdminCommand::Suspend { pro_id } => {
                handler::admin::act(app_state, AdminAction::ToggleSuspension, &pro_id, false).await
            }
            AdminCommand::Delete { pro_id, yes } => {
                handler::admin::act(app_state, AdminAction::Delete, &pro_id, yes).await
            }
        },
        Commands::Analytics => handler::admin::analytics(app_state).await,
        Commands::Services { command } => {
            let change = match command {
                None | Some(ServicesCommand::List) => None,
                Some(ServicesCommand::Add { name, number, location, skill }) => {
                    Some(DirectoryChange::Add(ServiceListingDto { name, number, location, skill }))
                }
                Some(ServicesCommand::Update { id, name, number, location, skill }) => Some(
                    DirectoryChange::Update(id, ServiceListingDto { name, number, location, skill }),
                ),
                Some(ServicesCommand::Delete { id }) => Some(DirectoryChange::Delete(id)),
            };
            handler::admin::services(app_state, change).await
        }
    }
}

fn report(result: PageResult) -> ExitCode {
    match result {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(PageError::Redirect(route)) => {
            eprintln!("Not allowed here. Redirecting to {}", route);
            ExitCode::FAILURE
        }
        Err(err @ PageError::Toast { .. }) => {
            eprintln!("{}", err);
            if let Some(route) = err.redirect() {
                eprintln!("Redirecting to {}", route);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_raises_the_default_level() {
        assert_eq!(log_filter(0, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(0, Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(0, Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn verbose_flags_override_rust_log() {
        assert_eq!(log_filter(1, Some("error")).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(3, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
