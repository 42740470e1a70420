//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::PackageManifest;

/// 프로세스 환경(환경변수/작업 디렉터리/홈 디렉터리) 조회 포트.
pub trait EnvProvider: Send + Sync {
    /// 값이 없거나 유니코드가 아니면 `None`.
    fn var(&self, name: &str) -> Option<String>;
    fn vars(&self) -> BTreeMap<String, String>;
    fn current_dir(&self) -> Result<PathBuf>;
    fn home_dir(&self) -> Option<PathBuf>;

    /// 후보 이름을 순서대로 조회해 처음 발견한 비어 있지 않은 값을 반환한다.
    fn first_var(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.var(name))
            .find(|v| !v.trim().is_empty())
    }
}

/// 프로젝트 디렉터리 파일 조회 포트.
pub trait ProjectFiles: Send + Sync {
    /// 프로젝트 루트 기준 상대 경로 파일 존재 여부. 조회 오류는 `false`.
    fn exists(&self, project_dir: &Path, relative: &str) -> bool;
    fn read_manifest(&self, project_dir: &Path) -> Result<PackageManifest>;
}

/// 다운로드 진행률 표시 포트(표시 전용, 흐름에 영향 없음).
pub trait DownloadProgress: Send + Sync {
    fn start(&self, total_bytes: Option<u64>);
    fn advance(&self, received_bytes: u64);
    fn finish(&self);
}

/// 배포 아카이브 다운로드 포트.
#[async_trait]
pub trait BinaryDownloader: Send + Sync {
    async fn download(
        &self,
        url: &str,
        destination: &Path,
        proxy: Option<&str>,
        progress: &dyn DownloadProgress,
    ) -> Result<()>;
}

/// 아카이브 압축 해제 포트.
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    async fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}

/// 외부 프로세스 실행 포트.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// 명령이 실행 가능한지(`-v` 등) 확인한다. 실행 실패/비정상 종료는 `false`.
    async fn probe(&self, command: &str, args: &[String]) -> bool;

    /// 표준 입출력과 부모 환경을 상속해 실행하고 종료 코드를 반환한다(시그널 종료는 `None`).
    /// `env` 값은 상속된 환경 위에 덮어쓴다.
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        env: &BTreeMap<String, String>,
    ) -> Result<Option<i32>>;
}

/// 파일이 실행 가능한 상태인지 확인하는 포트.
pub trait ExecutableProbe: Send + Sync {
    fn is_executable(&self, path: &Path) -> bool;
}
