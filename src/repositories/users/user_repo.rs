//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//!
//! ## 특징
//!
//! - **대소문자 무시 유일성**: `username`과 `email`은 소문자로 저장되고 유니크 인덱스로 보호됩니다
//! - **저장소 독립**: MongoDB와 인메모리 저장소 모두에서 동작합니다

use std::sync::Arc;

use log::debug;

use crate::core::{Model, ModelRegistry};
use crate::domain::dto::{NewUser, UserUpdate};
use crate::domain::entities::ids::UserId;
use crate::domain::entities::users::User;
use crate::errors::AppResult;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// - **MissingRequiredField**: username, email, password 중 하나가 비어 있음
/// - **UniquenessViolation**: 대소문자만 다른 사용자명/이메일 포함 중복
/// - **DatabaseError**: 저장소 연산 실패
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(&registry)?;
///
/// let created = repo.create(NewUser::new("Alice", "Alice@Example.com", "secret")).await?;
/// assert_eq!(created.username, "alice");
///
/// let renamed = repo.update(created.id, UserUpdate {
///     username: Some("alice2".to_string()),
///     ..Default::default()
/// }).await?;
/// ```
pub struct UserRepository {
    model: Arc<Model<User>>,
}

impl UserRepository {
    /// 레지스트리에 등록된 `User` 모델로 리포지토리를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - `User` 모델이 등록되지 않음
    pub fn new(registry: &Arc<ModelRegistry>) -> AppResult<Self> {
        Ok(Self {
            model: registry.model::<User>()?,
        })
    }

    pub async fn create(&self, input: NewUser) -> AppResult<User> {
        let user = self.model.create(input.to_fields()?).await?;
        debug!("사용자 생성: {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.model.find_by_id(id).await
    }

    /// 입력에 값이 있는 필드만 변경합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 수정된 사용자
    /// * `Ok(None)` - 해당 ID의 사용자가 없음
    pub async fn update(&self, id: UserId, input: UserUpdate) -> AppResult<Option<User>> {
        self.model.update(id, input.to_fields()?).await
    }

    pub async fn delete(&self, id: UserId) -> AppResult<bool> {
        self.model.delete(id).await
    }
}
