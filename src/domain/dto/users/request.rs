//! 사용자 생성/수정 요청 DTO

use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// 새 사용자 생성 입력
///
/// 대소문자는 그대로 전달되며, 소문자 정규화는 스키마가 수행합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn to_fields(&self) -> AppResult<Document> {
        Ok(bson::to_document(self)?)
    }
}

/// 사용자 부분 수정 입력
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn to_fields(&self) -> AppResult<Document> {
        Ok(bson::to_document(self)?)
    }
}
