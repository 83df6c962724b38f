//! 사용자 인증을 위한 도메인 모델.

mod identity;
mod user;

pub use identity::*;
pub use user::*;
