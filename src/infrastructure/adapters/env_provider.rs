//! 프로세스 환경 포트 구현 어댑터.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::EnvProvider;

/// 실제 프로세스 환경(`std::env`)을 읽는 어댑터.
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn vars(&self) -> BTreeMap<String, String> {
        // 유니코드가 아닌 값은 여기서 빠지지만 자식 프로세스는 환경을 상속받는다.
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        env::current_dir().context("failed to read current directory")
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// 고정된 값만 노출하는 환경. 테스트와 라이브러리 호출에서 실제 프로세스 상태를 건드리지 않는다.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    pub vars: BTreeMap<String, String>,
    pub current_dir: PathBuf,
    pub home_dir: Option<PathBuf>,
}

impl StaticEnv {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }
}

impl EnvProvider for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn vars(&self) -> BTreeMap<String, String> {
        self.vars.clone()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_var_skips_blank_values() {
        let env = StaticEnv::new("/tmp")
            .with_var("http_proxy", "  ")
            .with_var("HTTP_PROXY", "http://proxy:8080");
        assert_eq!(
            env.first_var(&["http_proxy", "HTTP_PROXY"]).as_deref(),
            Some("http://proxy:8080")
        );
        assert_eq!(env.first_var(&["MISSING"]), None);
    }
}
