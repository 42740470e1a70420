//! 애플리케이션 조립(composition root) 모듈.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::EnvProvider;
use crate::application::usecases::inspect_properties::InspectPropertiesUseCase;
use crate::application::usecases::locate_executable::LocateExecutableUseCase;
use crate::application::usecases::resolve_properties::ResolvePropertiesUseCase;
use crate::application::usecases::scan::ScanUseCase;
use crate::infrastructure::adapters::{
    ConsoleProgress, FsExecutableProbe, FsProjectFiles, HttpDownloader, ProcessEnv,
    TokioProcessRunner, ZipExtractor,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    env: Box<dyn EnvProvider>,
    project_files: FsProjectFiles,
    probe: FsExecutableProbe,
    downloader: HttpDownloader,
    extractor: ZipExtractor,
    runner: TokioProcessRunner,
    progress: ConsoleProgress,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::with_env(Box::new(ProcessEnv))
    }
}

impl AppComposition {
    /// 환경 어댑터를 외부에서 주입한다.
    pub fn with_env(env: Box<dyn EnvProvider>) -> Self {
        Self {
            env,
            project_files: FsProjectFiles,
            probe: FsExecutableProbe,
            downloader: HttpDownloader,
            extractor: ZipExtractor,
            runner: TokioProcessRunner,
            progress: ConsoleProgress::new(),
        }
    }

    /// 설정 맵 해석 유스케이스를 생성한다.
    pub fn resolve_properties_usecase(&self) -> ResolvePropertiesUseCase<'_> {
        ResolvePropertiesUseCase {
            env: self.env.as_ref(),
            project_files: &self.project_files,
        }
    }

    /// 실행 파일 탐색 유스케이스를 생성한다.
    pub fn locate_executable_usecase(&self) -> LocateExecutableUseCase<'_> {
        LocateExecutableUseCase {
            env: self.env.as_ref(),
            probe: &self.probe,
            downloader: &self.downloader,
            extractor: &self.extractor,
            runner: &self.runner,
            progress: &self.progress,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_properties_usecase(&self) -> InspectPropertiesUseCase<'_> {
        InspectPropertiesUseCase {
            resolver: self.resolve_properties_usecase(),
        }
    }

    /// 스캔 실행 유스케이스를 생성한다.
    pub fn scan_usecase(&self) -> ScanUseCase<'_> {
        ScanUseCase {
            env: self.env.as_ref(),
            runner: &self.runner,
            locator: self.locate_executable_usecase(),
            resolver: self.resolve_properties_usecase(),
        }
    }

    /// 분석 대상 디렉터리를 결정한다(미지정 시 현재 디렉터리).
    pub fn project_dir(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        match explicit {
            Some(dir) => Ok(dir),
            None => self.env.current_dir(),
        }
    }
}
