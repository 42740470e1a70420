//! 실행 파일 확보 -> 설정 해석 -> 스캐너 실행 유스케이스.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::{EnvProvider, ProcessRunner};
use crate::application::usecases::locate_executable::LocateExecutableUseCase;
use crate::application::usecases::resolve_properties::ResolvePropertiesUseCase;
use crate::domain::error::LauncherError;
use crate::domain::policy::scanner_args;
use crate::domain::properties::{SCANNER_PARAMS_ENV, ScannerProperties};
use crate::domain::scan::{LookupMode, ScanRequest};

pub struct ScanUseCase<'a> {
    pub env: &'a dyn EnvProvider,
    pub runner: &'a dyn ProcessRunner,
    pub locator: LocateExecutableUseCase<'a>,
    pub resolver: ResolvePropertiesUseCase<'a>,
}

impl<'a> ScanUseCase<'a> {
    /// 스캐너를 실행하고 0이 아닌 종료 코드는 `LauncherError::ScannerFailed`로 반환한다.
    pub async fn execute(&self, request: ScanRequest) -> Result<()> {
        tracing::info!("starting analysis...");

        let executable = self.executable(&request).await?;
        let project_dir = match request.project_dir.clone() {
            Some(dir) => dir,
            None => self.env.current_dir()?,
        };
        let properties = self.resolver.execute(&project_dir, &request.params);
        let env = child_env(self.env.vars(), properties.as_ref())?;
        let args = scanner_args(&request.extra_args);

        tracing::debug!(executable = %executable.display(), ?args, "running scanner");
        let code = self.runner.run(&executable, &args, &env).await?;
        match code {
            Some(0) => {
                tracing::info!("analysis finished.");
                Ok(())
            }
            code => {
                tracing::error!("return code: {}", code.map_or("none".to_string(), |c| c.to_string()));
                Err(LauncherError::ScannerFailed { code }.into())
            }
        }
    }

    async fn executable(&self, request: &ScanRequest) -> Result<PathBuf> {
        match &request.lookup {
            LookupMode::Download => self
                .locator
                .locate_or_download(&request.executable)
                .await?
                .ok_or_else(|| anyhow::Error::from(LauncherError::ExecutableUnavailable)),
            LookupMode::Local { command } => self.locator.locate_local(command.as_deref()).await,
        }
    }
}

/// 부모 환경 복사본에 직렬화된 설정 맵을 추가한다.
pub fn child_env(
    mut inherited: BTreeMap<String, String>,
    properties: Option<&ScannerProperties>,
) -> Result<BTreeMap<String, String>> {
    if let Some(props) = properties {
        inherited.insert(SCANNER_PARAMS_ENV.to_string(), props.to_env_value()?);
    }
    Ok(inherited)
}
