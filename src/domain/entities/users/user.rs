//! User Entity Implementation
//!
//! 할 일(todo) 애플리케이션의 계정 소유자를 표현하는 엔티티와 스키마입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::ids::UserId;
use crate::domain::entities::Entity;
use crate::domain::schema::{Field, Schema};
use crate::errors::AppResult;

/// 사용자 엔티티
///
/// `username`과 `email`은 소문자로 정규화되어 저장되므로 대소문자 구분 없이 유일합니다.
/// 비밀번호는 전달받은 값 그대로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    /// 사용자명 (unique, lowercase)
    pub username: String,
    /// 사용자 이메일 (unique, lowercase)
    pub email: String,
    /// 비밀번호
    pub password: String,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Entity for User {
    const MODEL_NAME: &'static str = "User";
    type Id = UserId;

    fn schema() -> AppResult<Schema> {
        Schema::builder(Self::MODEL_NAME)
            .field(Field::string("username").required().unique().lowercase())
            .field(Field::string("email").required().unique().lowercase())
            .field(Field::string("password").required())
            .timestamps()
            .build()
    }

    fn id(&self) -> UserId {
        self.id
    }
}
