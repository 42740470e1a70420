//! 스캐너 설정 맵을 레이어 우선순위대로 해석하는 유스케이스.

use std::path::Path;

use crate::application::config::{
    LCOV_REPORT_FILE, PROJECT_DESCRIPTOR_FILE, PackageManifest, TEST_REPORT_FILE,
    TEST_REPORTER_PACKAGE,
};
use crate::application::ports::{EnvProvider, ProjectFiles};
use crate::domain::policy::{explicit_layer, join_posix};
use crate::domain::properties::{
    KEY_EXCLUSIONS, KEY_LCOV_REPORT_PATHS, KEY_LINKS_HOMEPAGE, KEY_LINKS_ISSUE, KEY_LINKS_SCM,
    KEY_PROJECT_DESCRIPTION, KEY_PROJECT_KEY, KEY_PROJECT_NAME, KEY_PROJECT_VERSION,
    KEY_TEST_EXECUTION_REPORT_PATHS, SCANNER_PARAMS_ENV, ScannerProperties,
};
use crate::domain::scan::ScannerParams;
use crate::domain::slug::slugify;

/// 기본값 -> package.json -> 환경변수 -> 호출자 명시값 순으로 병합한다.
/// 어떤 단계의 실패도 호출자에게 전파하지 않는다.
pub struct ResolvePropertiesUseCase<'a> {
    pub env: &'a dyn EnvProvider,
    pub project_files: &'a dyn ProjectFiles,
}

impl<'a> ResolvePropertiesUseCase<'a> {
    /// 최종 설정 맵을 반환한다. 비어 있으면 `None`.
    pub fn execute(&self, project_dir: &Path, params: &ScannerParams) -> Option<ScannerProperties> {
        let layers = [
            self.project_layer(project_dir),
            self.env_layer(),
            explicit_layer(params),
        ];

        let mut merged = ScannerProperties::new();
        for layer in layers {
            merged.overlay(layer);
        }
        merged.into_non_empty()
    }

    /// 기본값과 package.json 파생값.
    /// `sonar-project.properties`가 있으면 스캐너가 직접 읽으므로 빈 맵을 반환한다.
    fn project_layer(&self, project_dir: &Path) -> ScannerProperties {
        if self.project_files.exists(project_dir, PROJECT_DESCRIPTOR_FILE) {
            tracing::info!("found {PROJECT_DESCRIPTOR_FILE}, skipping default properties");
            return ScannerProperties::new();
        }

        let mut props = ScannerProperties::defaults();
        match self.project_files.read_manifest(project_dir) {
            Ok(manifest) => {
                tracing::info!("retrieving info from package.json");
                props.overlay(self.manifest_layer(project_dir, &manifest, &props));
            }
            Err(err) => {
                tracing::info!("no valid package.json found ({err:#}); using default settings");
            }
        }
        props
    }

    fn manifest_layer(
        &self,
        project_dir: &Path,
        manifest: &PackageManifest,
        base: &ScannerProperties,
    ) -> ScannerProperties {
        let mut layer = ScannerProperties::new();
        layer.set(KEY_PROJECT_KEY, slugify(&manifest.name));
        layer.set(KEY_PROJECT_NAME, manifest.name.as_str());

        if let Some(version) = manifest.version.as_deref() {
            layer.set(KEY_PROJECT_VERSION, version);
        }
        if let Some(description) = manifest.description.as_deref().filter(|v| !v.is_empty()) {
            layer.set(KEY_PROJECT_DESCRIPTION, description);
        }
        if let Some(homepage) = manifest.homepage.as_deref().filter(|v| !v.is_empty()) {
            layer.set(KEY_LINKS_HOMEPAGE, homepage);
        }
        if let Some(url) = manifest.bugs.as_ref().and_then(|l| l.url()) {
            layer.set(KEY_LINKS_ISSUE, url);
        }
        if let Some(url) = manifest.repository.as_ref().and_then(|l| l.url()) {
            layer.set(KEY_LINKS_SCM, url);
        }

        let mut exclusions = base.get(KEY_EXCLUSIONS).unwrap_or_default().to_string();
        let coverage = manifest
            .coverage_dir_candidates()
            .into_iter()
            .map(|dir| (join_posix(&dir, "**"), join_posix(&dir, LCOV_REPORT_FILE)))
            .find(|(_, report)| self.project_files.exists(project_dir, report));
        if let Some((excluded, report)) = coverage {
            tracing::debug!("found coverage report at {report}");
            if !exclusions.is_empty() {
                exclusions.push(',');
            }
            exclusions.push_str(&excluded);
            layer.set(KEY_LCOV_REPORT_PATHS, report);
        }
        layer.set(KEY_EXCLUSIONS, exclusions);

        if manifest.declares_dependency(TEST_REPORTER_PACKAGE)
            && self.project_files.exists(project_dir, TEST_REPORT_FILE)
        {
            layer.set(KEY_TEST_EXECUTION_REPORT_PATHS, TEST_REPORT_FILE);
        }

        layer
    }

    /// 부모 프로세스가 넘긴 설정 맵. 형식 오류는 경고 후 무시한다.
    fn env_layer(&self) -> ScannerProperties {
        let Some(raw) = self.env.var(SCANNER_PARAMS_ENV).filter(|v| !v.trim().is_empty()) else {
            return ScannerProperties::new();
        };

        match ScannerProperties::from_env_value(&raw) {
            Ok(props) => props,
            Err(err) => {
                tracing::warn!("ignoring {SCANNER_PARAMS_ENV}: {err:#}");
                ScannerProperties::new()
            }
        }
    }
}
