//! scanpilot library root.
//! SonarScanner 실행 파일을 찾거나 내려받아, 프로젝트 설정과 함께 실행한다.

use std::path::{Path, PathBuf};

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::properties::ScannerProperties;
use domain::scan::{ExecutableOverrides, ScanRequest, ScannerParams};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 실행 함수.
/// 스캐너가 0이 아닌 코드로 끝나면 `LauncherError::ScannerFailed`를 반환한다.
pub async fn scan(request: ScanRequest) -> Result<()> {
    let composition = AppComposition::default();
    composition.scan_usecase().execute(request).await
}

/// 스캐너에 전달될 설정 맵을 해석한다.
pub fn resolve_properties(project_dir: &Path, params: &ScannerParams) -> Option<ScannerProperties> {
    let composition = AppComposition::default();
    composition
        .resolve_properties_usecase()
        .execute(project_dir, params)
}

/// 캐시된 실행 파일을 찾거나 내려받는다. 다운로드 실패 시 `Ok(None)`.
pub async fn locate_executable(overrides: &ExecutableOverrides) -> Result<Option<PathBuf>> {
    let composition = AppComposition::default();
    composition
        .locate_executable_usecase()
        .locate_or_download(overrides)
        .await
}
