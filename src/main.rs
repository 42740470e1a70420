//! `scanpilot` 바이너리 진입점.

use scanpilot::domain::error::LauncherError;
use scanpilot::domain::scan::LookupMode;
use scanpilot::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    let result = match action {
        CliAction::InspectProperties {
            project_dir,
            params,
        } => {
            composition
                .project_dir(project_dir)
                .and_then(|dir| {
                    composition
                        .inspect_properties_usecase()
                        .execute(&dir, &params)
                })
                .map(|json| println!("{json}"))
        }
        CliAction::Locate { lookup, overrides } => {
            let locator = composition.locate_executable_usecase();
            let located = match lookup {
                LookupMode::Download => locator
                    .locate_or_download(&overrides)
                    .await
                    .and_then(|path| path.ok_or_else(|| LauncherError::ExecutableUnavailable.into())),
                LookupMode::Local { command } => locator.locate_local(command.as_deref()).await,
            };
            located.map(|path| println!("{}", path.display()))
        }
        CliAction::Scan(request) => composition.scan_usecase().execute(request).await,
    };

    if let Err(err) = result {
        let code = err
            .downcast_ref::<LauncherError>()
            .map_or(1, LauncherError::exit_code);
        if !matches!(
            err.downcast_ref::<LauncherError>(),
            Some(LauncherError::ScannerFailed { .. })
        ) {
            eprintln!("error: {err:#}");
        }
        std::process::exit(code);
    }
}
