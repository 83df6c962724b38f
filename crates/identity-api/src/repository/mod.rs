//! 사용자 저장소.
//!
//! 비즈니스 로직은 [`UserRepository`] trait만 사용하며, 실행 환경에 따라
//! 메모리 구현 또는 PostgreSQL 구현이 주입됩니다.

mod memory;
mod postgres;

use async_trait::async_trait;
use identity_core::{DomainError, NewUser, Role, User};

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("이미 존재하는 사용자 이름: {0}")]
    Duplicate(String),
    #[error("데이터베이스 에러: {0}")]
    Database(#[from] sqlx::Error),
    #[error("잘못된 저장 레코드: {0}")]
    InvalidRecord(String),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(_) => DomainError::DuplicateUser,
            other => DomainError::Internal(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 사용자 레코드 저장소.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 사용자 이름 존재 여부.
    async fn exists_by_username(&self, username: &str) -> RepositoryResult<bool>;

    /// 신규 사용자 저장. ID는 저장소가 부여합니다.
    ///
    /// 같은 이름이 이미 있으면 [`RepositoryError::Duplicate`].
    async fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// 역할 변경. 대상이 없으면 `None`.
    async fn update_role(&self, id: i64, role: Role) -> RepositoryResult<Option<User>>;
}
