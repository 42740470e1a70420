//! 애플리케이션 유스케이스 모음.

pub mod inspect_properties;
pub mod locate_executable;
pub mod resolve_properties;
pub mod scan;
