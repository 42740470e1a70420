//! 외부 프로세스 실행 포트 구현 어댑터.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ExecutableProbe, ProcessRunner};

/// tokio 프로세스로 스캐너를 실행하는 어댑터.
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn probe(&self, command: &str, args: &[String]) -> bool {
        let status = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => status.success(),
            Err(err) => {
                tracing::debug!("failed to run {command}: {err}");
                false
            }
        }
    }

    async fn run(
        &self,
        program: &Path,
        args: &[String],
        env: &BTreeMap<String, String>,
    ) -> Result<Option<i32>> {
        // 표준 입출력을 그대로 상속하므로 출력 크기 제한이 없다.
        // 환경은 지우지 않고 덮어쓴다. 유니코드가 아닌 부모 변수도 그대로 전달된다.
        let status = Command::new(program)
            .args(args)
            .envs(env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to run {}", program.display()))?;

        Ok(status.code())
    }
}

/// 파일시스템에서 실행 가능 여부를 확인하는 어댑터.
pub struct FsExecutableProbe;

impl ExecutableProbe for FsExecutableProbe {
    fn is_executable(&self, path: &Path) -> bool {
        let Ok(meta) = path.metadata() else {
            return false;
        };
        if !meta.is_file() {
            return false;
        }

        #[cfg(unix)]
        let executable = {
            use std::os::unix::fs::PermissionsExt;
            (meta.permissions().mode() & 0o111) != 0
        };
        #[cfg(not(unix))]
        let executable = true;

        executable
    }
}
