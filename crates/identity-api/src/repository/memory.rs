//! 메모리 기반 사용자 저장소.
//!
//! 데이터베이스가 설정되지 않은 환경과 테스트에서 사용합니다.
//! 프로세스 종료 시 데이터는 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use identity_core::{NewUser, Role, User};
use tokio::sync::RwLock;

use super::{RepositoryError, RepositoryResult, UserRepository};

#[derive(Debug)]
struct Inner {
    users: HashMap<i64, User>,
    by_username: HashMap<String, i64>,
    next_id: i64,
}

/// 메모리 사용자 저장소.
///
/// ID는 1부터 순차적으로 부여됩니다.
#[derive(Debug)]
pub struct MemoryUserRepository {
    inner: RwLock<Inner>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: HashMap::new(),
                by_username: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 저장된 사용자 수.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn exists_by_username(&self, username: &str) -> RepositoryResult<bool> {
        Ok(self.inner.read().await.by_username.contains_key(username))
    }

    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let mut inner = self.inner.write().await;

        // 쓰기 잠금 안에서 다시 확인
        if inner.by_username.contains_key(&user.username) {
            return Err(RepositoryError::Duplicate(user.username));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = user.into_user(id);
        inner.by_username.insert(user.username.clone(), id);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let inner = self.inner.read().await;

        Ok(inner
            .by_username
            .get(username)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn update_role(&self, id: i64, role: Role) -> RepositoryResult<Option<User>> {
        let mut inner = self.inner.write().await;

        Ok(inner.users.get_mut(&id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }
}
