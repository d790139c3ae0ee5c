use std::fs::File;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use simplelog::Config;
use simplelog::WriteLogger;

use qswr_admin::cli::Cli;
use qswr_admin::cli::Command;
use qswr_admin::commands;
use qswr_admin::commands::Context;
use qswr_admin::error::AppError;
use qswr_admin::paths::AppPaths;
use qswr_admin::projects::constants::messages;
use qswr_admin::toast::Toaster;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(paths) = AppPaths::resolve(cli.data_dir.as_deref()) else {
        eprintln!("Error: {}", AppError::NoDataDir);
        return ExitCode::FAILURE;
    };
    if let Err(e) = paths.ensure() {
        eprintln!("Error: cannot create {}: {}", paths.data_dir().display(), e);
        return ExitCode::FAILURE;
    }
    paths.rotate_logs();

    let log_file = File::create(paths.log_file()).expect("Failed to create log file");
    WriteLogger::init(cli.log_level, Config::default(), log_file).expect("Failed to initialize logger");
    log::info!("qswr-admin {} against {}", env!("CARGO_PKG_VERSION"), cli.url);

    let toaster = Toaster::with_listener(|toast| eprintln!("{}", toast));
    let timeout = cli.timeout.map(Duration::from_secs);
    let ctx = match Context::open(&paths, &cli.url, timeout, toaster.clone()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("failed to open local stores: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = dispatch(&ctx, cli.command.as_ref()).await;
    let code = match &result {
        Ok(()) if toaster.has_errors() => 1,
        Ok(()) => 0,
        Err(e) => {
            log::error!("command failed: {}", e);
            ctx.report(e);
            if e.is_unauthorized() {
                // The backend rejected the session; ask for a fresh login.
                if let Err(e) = ctx.sessions.clear().await {
                    log::warn!("failed to clear rejected session: {}", e);
                }
                ctx.toaster.info(messages::LOGIN_REQUIRED, "qswr-admin login");
            }
            e.exit_code()
        }
    };

    ExitCode::from(code)
}

async fn dispatch(ctx: &Context, command: Option<&Command>) -> Result<(), AppError> {
    match command {
        Some(Command::Login { username, password }) => {
            commands::login::run(ctx, username, password).await.map(|_| ())
        }
        Some(Command::Logout) => commands::logout::run(ctx).await,
        Some(Command::Projects { command }) => commands::projects::run(ctx, command).await,
        Some(Command::Profile) => commands::profile::run(ctx).await,
        Some(Command::Dashboard) | None => commands::dashboard::run(ctx).await,
    }
}
