//! 호출자에게 노출되는 실행 오류 분류.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("your platform '{0}' is currently not supported")]
    UnsupportedPlatform(String),

    #[error("local install of SonarScanner not found in: {command}")]
    LocalExecutableNotFound { command: String },

    #[error("no SonarScanner executable is available for this platform")]
    ExecutableUnavailable,

    #[error("SonarScanner exited with {}", exit_label(.code))]
    ScannerFailed { code: Option<i32> },
}

impl LauncherError {
    /// 프로세스 종료 코드로 전달할 값.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScannerFailed { code: Some(code) } => *code,
            _ => 1,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}
