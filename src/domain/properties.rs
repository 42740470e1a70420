//! 스캐너에 전달되는 평면(flat) 설정 맵과 병합 규칙.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde_json::Value;

/// 자식 프로세스에 설정 맵을 전달하는 환경변수 이름.
pub const SCANNER_PARAMS_ENV: &str = "SONARQUBE_SCANNER_PARAMS";

pub const KEY_HOST_URL: &str = "sonar.host.url";
pub const KEY_LOGIN: &str = "sonar.login";
pub const KEY_PROJECT_KEY: &str = "sonar.projectKey";
pub const KEY_PROJECT_NAME: &str = "sonar.projectName";
pub const KEY_PROJECT_VERSION: &str = "sonar.projectVersion";
pub const KEY_PROJECT_DESCRIPTION: &str = "sonar.projectDescription";
pub const KEY_SOURCES: &str = "sonar.sources";
pub const KEY_EXCLUSIONS: &str = "sonar.exclusions";
pub const KEY_LINKS_HOMEPAGE: &str = "sonar.links.homepage";
pub const KEY_LINKS_ISSUE: &str = "sonar.links.issue";
pub const KEY_LINKS_SCM: &str = "sonar.links.scm";
pub const KEY_LCOV_REPORT_PATHS: &str = "sonar.javascript.lcov.reportPaths";
pub const KEY_TEST_EXECUTION_REPORT_PATHS: &str = "sonar.testExecutionReportPaths";

pub const DEFAULT_DESCRIPTION: &str = "No description.";
pub const DEFAULT_SOURCES: &str = ".";
pub const DEFAULT_EXCLUSIONS: &str =
    "node_modules/**,bower_components/**,jspm_packages/**,typings/**,lib-cov/**";

/// 점(.)으로 구분된 키 -> 문자열 값 맵.
/// 키 순서는 의미가 없지만 직렬화 결과를 안정적으로 유지하기 위해 정렬 맵을 쓴다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerProperties(BTreeMap<String, String>);

impl ScannerProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// 프로젝트 기술 파일이 없을 때 적용하는 기본값.
    pub fn defaults() -> Self {
        let mut props = Self::new();
        props.set(KEY_PROJECT_DESCRIPTION, DEFAULT_DESCRIPTION);
        props.set(KEY_SOURCES, DEFAULT_SOURCES);
        props.set(KEY_EXCLUSIONS, DEFAULT_EXCLUSIONS);
        props
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 후순위 레이어 값으로 같은 키를 덮어쓴다.
    pub fn overlay(&mut self, layer: ScannerProperties) {
        self.0.extend(layer.0);
    }

    /// 비어 있으면 `None`을 반환한다(환경변수를 내보내지 않기 위함).
    pub fn into_non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// 환경변수 값(JSON 객체 문자열)으로 직렬화한다.
    pub fn to_env_value(&self) -> Result<String> {
        serde_json::to_string(&self.0).context("failed to serialize scanner properties")
    }

    /// 환경변수 값(JSON 객체 문자열)을 해석한다.
    /// - 문자열이 아닌 값은 JSON 표현 그대로 문자열화하고 `null`은 버린다.
    pub fn from_env_value(raw: &str) -> Result<Self> {
        let parsed: BTreeMap<String, Value> = serde_json::from_str(raw)
            .with_context(|| format!("{SCANNER_PARAMS_ENV} is not a JSON object"))?;

        let mut props = Self::new();
        for (key, value) in parsed {
            match value {
                Value::Null => {}
                Value::String(s) => props.set(key, s),
                other => props.set(key, other.to_string()),
            }
        }
        Ok(props)
    }
}

impl From<BTreeMap<String, String>> for ScannerProperties {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScannerProperties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl serde::Serialize for ScannerProperties {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
