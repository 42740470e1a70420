//! 해석된 스캐너 설정 맵을 확인하는 유스케이스.

use std::path::Path;

use anyhow::Result;

use crate::application::usecases::resolve_properties::ResolvePropertiesUseCase;
use crate::domain::properties::ScannerProperties;
use crate::domain::scan::ScannerParams;

/// 스캐너에 전달될 설정 맵을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectPropertiesUseCase<'a> {
    pub resolver: ResolvePropertiesUseCase<'a>,
}

impl<'a> InspectPropertiesUseCase<'a> {
    /// 설정 맵이 비어 있으면 `{}`를 출력한다.
    pub fn execute(&self, project_dir: &Path, params: &ScannerParams) -> Result<String> {
        let props = self
            .resolver
            .execute(project_dir, params)
            .unwrap_or_else(ScannerProperties::new);
        Ok(serde_json::to_string_pretty(&props)?)
    }
}
