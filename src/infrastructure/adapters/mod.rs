//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod downloader;
mod env_provider;
mod extractor;
mod process_runner;
mod progress;
mod project_files;

pub use downloader::HttpDownloader;
pub use env_provider::{ProcessEnv, StaticEnv};
pub use extractor::ZipExtractor;
pub use process_runner::{FsExecutableProbe, TokioProcessRunner};
pub use progress::ConsoleProgress;
pub use project_files::FsProjectFiles;
