//! 실행 OS를 스캐너 배포 아티팩트 플랫폼으로 해석하는 모듈.

use std::fmt;

use crate::domain::error::LauncherError;

/// 스캐너 바이너리가 배포되는 플랫폼.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// 현재 프로세스가 실행 중인 OS를 감지한다.
    pub fn detect() -> Result<Self, LauncherError> {
        Self::from_os(std::env::consts::OS)
    }

    /// OS 식별 문자열을 플랫폼으로 변환한다.
    /// - `win*` 접두어는 모두 Windows로 본다.
    pub fn from_os(os: &str) -> Result<Self, LauncherError> {
        let lower = os.trim().to_ascii_lowercase();
        if lower.starts_with("win") {
            return Ok(Self::Windows);
        }
        if lower.starts_with("linux") {
            return Ok(Self::Linux);
        }
        if lower.starts_with("macos") || lower.starts_with("darwin") {
            return Ok(Self::MacOs);
        }
        Err(LauncherError::UnsupportedPlatform(os.to_string()))
    }

    /// 배포 아카이브 이름에 쓰이는 플랫폼 식별자.
    pub fn artifact_id(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macosx",
        }
    }

    /// 실행 파일 확장자.
    pub fn executable_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".bat",
            Self::Linux | Self::MacOs => "",
        }
    }

    pub fn executable_name(self, base: &str) -> String {
        format!("{base}{}", self.executable_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.artifact_id())
    }
}
