//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::domain::scan::ExecutableOverrides;

pub const DEFAULT_SCANNER_VERSION: &str = "4.7.0.2747";
pub const DEFAULT_SCANNER_MIRROR: &str =
    "https://binaries.sonarsource.com/Distribution/sonar-scanner-cli/";

pub const ENV_SCANNER_VERSION: &str = "SONAR_SCANNER_VERSION";
pub const ENV_BINARY_CACHE: &str = "SONAR_BINARY_CACHE";
pub const ENV_SCANNER_MIRROR: &str = "SONAR_SCANNER_MIRROR";
pub const ENV_PROXY: &[&str] = &["http_proxy", "HTTP_PROXY"];

/// 테스트 리포트 자동 탐지 대상 의존성.
pub const TEST_REPORTER_PACKAGE: &str = "mocha-sonarqube-reporter";
pub const TEST_REPORT_FILE: &str = "xunit.xml";
pub const DEFAULT_COVERAGE_DIR: &str = "coverage";
pub const LCOV_REPORT_FILE: &str = "lcov.info";

pub const MANIFEST_FILE: &str = "package.json";
pub const PROJECT_DESCRIPTOR_FILE: &str = "sonar-project.properties";

/// `package.json`에서 읽는 필드만 정의한 스키마.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub bugs: Option<ManifestLink>,
    pub repository: Option<ManifestLink>,
    pub nyc: Option<NycSettings>,
    pub jest: Option<JestSettings>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, Value>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, Value>,
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: BTreeMap<String, Value>,
}

/// `bugs`/`repository`는 문자열 축약형도 허용되지만 `url` 필드만 사용한다.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ManifestLink {
    Detailed { url: Option<String> },
    Shorthand(String),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NycSettings {
    #[serde(rename = "report-dir")]
    pub report_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JestSettings {
    #[serde(rename = "coverageDirectory")]
    pub coverage_directory: Option<String>,
}

impl ManifestLink {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Detailed { url } => url.as_deref().filter(|v| !v.is_empty()),
            Self::Shorthand(_) => None,
        }
    }
}

impl PackageManifest {
    /// dependencies/devDependencies/peerDependencies 중 하나에 선언되어 있는지 확인한다.
    pub fn declares_dependency(&self, package: &str) -> bool {
        [
            &self.dependencies,
            &self.dev_dependencies,
            &self.peer_dependencies,
        ]
        .iter()
        .any(|deps| deps.contains_key(package))
    }

    /// 커버리지 출력 후보 디렉터리(nyc -> jest -> 기본값, 중복 제거).
    pub fn coverage_dir_candidates(&self) -> Vec<String> {
        let configured = [
            self.nyc.as_ref().and_then(|n| n.report_dir.clone()),
            self.jest.as_ref().and_then(|j| j.coverage_directory.clone()),
        ];

        let mut out: Vec<String> = Vec::new();
        for dir in configured
            .into_iter()
            .flatten()
            .filter(|d| !d.trim().is_empty())
            .chain(std::iter::once(DEFAULT_COVERAGE_DIR.to_string()))
        {
            if !out.contains(&dir) {
                out.push(dir);
            }
        }
        out
    }
}

/// 실행 파일 탐색/다운로드에 쓰는 설정.
/// 각 필드는 독립적으로 호출자 지정값 -> 환경변수 -> 기본값 순으로 결정된다.
#[derive(Debug, Clone, Default)]
pub struct ExecutableSettings {
    pub version: Option<String>,
    pub cache_base: Option<PathBuf>,
    pub mirror: Option<String>,
    pub proxy: Option<String>,
}

impl ExecutableSettings {
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_SCANNER_VERSION)
    }

    pub fn mirror(&self) -> &str {
        self.mirror.as_deref().unwrap_or(DEFAULT_SCANNER_MIRROR)
    }

    /// 후순위 값으로 덮어쓰는 병합 규칙(빈 문자열은 미지정으로 본다).
    pub fn merge_from(&mut self, other: ExecutableSettings) {
        if let Some(version) = other.version.filter(|v| !v.trim().is_empty()) {
            self.version = Some(version);
        }
        if let Some(base) = other.cache_base.filter(|p| !p.as_os_str().is_empty()) {
            self.cache_base = Some(base);
        }
        if let Some(mirror) = other.mirror.filter(|v| !v.trim().is_empty()) {
            self.mirror = Some(mirror);
        }
        if let Some(proxy) = other.proxy.filter(|v| !v.trim().is_empty()) {
            self.proxy = Some(proxy);
        }
    }
}

/// 로그/오류 메시지용 프록시 표기. URL의 사용자 정보는 가린다.
pub fn redact_proxy(raw: &str) -> String {
    let mut url = match Url::parse(raw) {
        Ok(url) if url.has_host() => url,
        _ => return "<unparsable proxy>".to_string(),
    };
    if !url.username().is_empty() || url.password().is_some() {
        let _ = url.set_username("***");
        let _ = url.set_password(None);
    }
    url.to_string()
}

impl From<ExecutableOverrides> for ExecutableSettings {
    fn from(overrides: ExecutableOverrides) -> Self {
        Self {
            version: overrides.version,
            cache_base: overrides.cache_base,
            mirror: overrides.mirror,
            proxy: None,
        }
    }
}
