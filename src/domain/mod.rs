//! Domain layer
//! 스캐너 실행 규칙(값 객체/설정 맵/정책)을 외부 I/O 없이 표현한다.

pub mod error;
pub mod platform;
pub mod policy;
pub mod properties;
pub mod scan;
pub mod slug;
