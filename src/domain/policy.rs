//! 도메인 정책(캐시 레이아웃, 다운로드 파일명, 실행 인자 규칙).

use std::path::{Path, PathBuf};

use crate::domain::platform::Platform;
use crate::domain::properties::{KEY_HOST_URL, KEY_LOGIN, ScannerProperties};
use crate::domain::scan::ScannerParams;

pub const SCANNER_COMMAND: &str = "sonar-scanner";
pub const SCANNER_ARCHIVE_PREFIX: &str = "sonar-scanner-cli";

/// 캐시 베이스 아래 스캐너 설치 폴더.
pub fn install_folder(base: &Path) -> PathBuf {
    base.join(".sonar").join("native-sonar-scanner")
}

/// 압축 해제 후 기대하는 실행 파일 경로.
pub fn executable_path(install_folder: &Path, version: &str, platform: Platform) -> PathBuf {
    install_folder
        .join(format!("{SCANNER_COMMAND}-{version}-{platform}"))
        .join("bin")
        .join(platform.executable_name(SCANNER_COMMAND))
}

pub fn archive_file_name(version: &str, platform: Platform) -> String {
    format!("{SCANNER_ARCHIVE_PREFIX}-{version}-{platform}.zip")
}

/// `/` 구분 상대 경로를 이어 붙이고 `.`/`..`/중복 구분자를 정리한다.
/// 스캐너의 패턴 매칭은 기준 디렉터리 상대 경로로 하므로 `./cov`는 `cov`가 되어야 한다.
pub fn join_posix(dir: &str, tail: &str) -> String {
    let absolute = dir.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(tail.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// 스캐너에 호출 래퍼를 알리는 정보 플래그.
pub fn from_flag() -> String {
    format!("--from=ScanPilot/{}", env!("CARGO_PKG_VERSION"))
}

/// `--from` 플래그를 항상 맨 앞에 둔다.
pub fn scanner_args(extra: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(extra.len() + 1);
    args.push(from_flag());
    args.extend(extra.iter().cloned());
    args
}

/// 호출자 명시값 레이어. 서버 URL/토큰 뒤에 options를 덮어쓴다.
pub fn explicit_layer(params: &ScannerParams) -> ScannerProperties {
    let mut layer = ScannerProperties::new();
    if let Some(url) = params.server_url.as_deref().filter(|v| !v.is_empty()) {
        layer.set(KEY_HOST_URL, url);
    }
    if let Some(token) = params.token.as_deref().filter(|v| !v.is_empty()) {
        layer.set(KEY_LOGIN, token);
    }
    layer.overlay(ScannerProperties::from(params.options.clone()));
    layer
}
