//! CLI 명령 파싱 모듈.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::scan::{ExecutableOverrides, LookupMode, ScanRequest, ScannerParams};

#[derive(Debug, Parser)]
#[command(name = "scanpilot", version)]
#[command(about = "Locate, download and run SonarScanner for the current project")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    project: ProjectArgs,

    #[command(flatten)]
    executable: ExecutableArgs,

    /// Arguments forwarded to sonar-scanner (after `--`)
    #[arg(last = true, value_name = "SCANNER_ARGS")]
    scanner_args: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the resolved scanner properties as JSON
    Properties(ProjectArgs),
    /// Print the path of the scanner executable, downloading it if needed
    Locate(ExecutableArgs),
}

#[derive(Debug, Args)]
struct ProjectArgs {
    /// Project directory to analyze (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Server URL, sent as sonar.host.url
    #[arg(long)]
    server_url: Option<String>,

    /// Authentication token, sent as sonar.login
    #[arg(long)]
    token: Option<String>,

    /// Scanner property overriding every other source (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    define: Vec<(String, String)>,
}

#[derive(Debug, Args)]
struct ExecutableArgs {
    /// SonarScanner version to download
    #[arg(long)]
    scanner_version: Option<String>,

    /// Base directory of the binary cache (defaults to the home directory)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Mirror base URL for scanner downloads
    #[arg(long, value_name = "URL")]
    mirror: Option<String>,

    /// Use a sonar-scanner installed on PATH instead of downloading one
    #[arg(long)]
    local: bool,

    /// Command used with --local
    #[arg(long, value_name = "CMD", requires = "local")]
    local_command: Option<String>,
}

pub enum CliAction {
    Scan(ScanRequest),
    InspectProperties {
        project_dir: Option<PathBuf>,
        params: ScannerParams,
    },
    Locate {
        lookup: LookupMode,
        overrides: ExecutableOverrides,
    },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Self::parse().into_action()
    }

    pub fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Some(Commands::Properties(project)) => Ok(CliAction::InspectProperties {
                project_dir: project.project_dir.clone(),
                params: project.params(),
            }),
            Some(Commands::Locate(executable)) => Ok(CliAction::Locate {
                lookup: executable.lookup(),
                overrides: executable.overrides(),
            }),
            None => Ok(CliAction::Scan(ScanRequest {
                project_dir: self.project.project_dir.clone(),
                params: self.project.params(),
                lookup: self.executable.lookup(),
                executable: self.executable.overrides(),
                extra_args: self.scanner_args,
            })),
        }
    }
}

impl ProjectArgs {
    fn params(&self) -> ScannerParams {
        let options: BTreeMap<String, String> = self.define.iter().cloned().collect();
        ScannerParams {
            server_url: self.server_url.clone(),
            token: self.token.clone(),
            options,
        }
    }
}

impl ExecutableArgs {
    fn lookup(&self) -> LookupMode {
        if self.local {
            LookupMode::Local {
                command: self.local_command.clone(),
            }
        } else {
            LookupMode::Download
        }
    }

    fn overrides(&self) -> ExecutableOverrides {
        ExecutableOverrides {
            version: self.scanner_version.clone(),
            cache_base: self.cache_dir.clone(),
            mirror: self.mirror.clone(),
        }
    }
}

fn parse_define(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("property key is empty in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
