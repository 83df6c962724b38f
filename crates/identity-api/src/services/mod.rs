//! 비즈니스 로직 서비스.

pub mod user;

pub use user::UserService;
