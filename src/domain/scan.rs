//! 스캔 실행 요청 값 객체.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// 호출자가 명시한 스캐너 설정(최우선 레이어).
#[derive(Debug, Clone, Default)]
pub struct ScannerParams {
    /// `sonar.host.url`로 매핑
    pub server_url: Option<String>,
    /// `sonar.login`으로 매핑
    pub token: Option<String>,
    /// 그대로 병합되는 임의 옵션(가장 마지막에 적용)
    pub options: BTreeMap<String, String>,
}

/// 실행 파일 탐색/다운로드 설정의 호출자 지정값.
#[derive(Debug, Clone, Default)]
pub struct ExecutableOverrides {
    pub version: Option<String>,
    pub cache_base: Option<PathBuf>,
    pub mirror: Option<String>,
}

/// 실행 파일 확보 방식. 두 방식은 서로 대체하지 않는다.
#[derive(Debug, Clone, Default)]
pub enum LookupMode {
    /// 캐시 경로를 확인하고 없으면 배포 아카이브를 내려받는다.
    #[default]
    Download,
    /// PATH에 설치된 명령을 사용한다.
    Local { command: Option<String> },
}

#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// 분석 대상 디렉터리(미지정 시 현재 디렉터리)
    pub project_dir: Option<PathBuf>,
    pub params: ScannerParams,
    pub executable: ExecutableOverrides,
    pub lookup: LookupMode,
    /// `--from` 플래그 뒤에 그대로 전달되는 인자
    pub extra_args: Vec<String>,
}
