//! 프로젝트 파일 조회 포트 구현 어댑터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::config::{MANIFEST_FILE, PackageManifest};
use crate::application::ports::ProjectFiles;

/// 로컬 파일시스템 기반 프로젝트 파일 어댑터.
pub struct FsProjectFiles;

impl ProjectFiles for FsProjectFiles {
    fn exists(&self, project_dir: &Path, relative: &str) -> bool {
        project_dir.join(relative).try_exists().unwrap_or(false)
    }

    fn read_manifest(&self, project_dir: &Path) -> Result<PackageManifest> {
        let path = project_dir.join(MANIFEST_FILE);
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse JSON in {}", path.display()))
    }
}
