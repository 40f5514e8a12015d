//! 상품 생성/수정 요청 DTO

use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ids::{CategoryId, UserId};
use crate::errors::AppResult;

/// 새 상품 생성 입력
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    /// 생략 시 스키마 기본값(0)이 적용됩니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
}

impl NewProduct {
    pub fn to_fields(&self) -> AppResult<Document> {
        Ok(bson::to_document(self)?)
    }
}

/// 상품 부분 수정 입력
///
/// `None`인 필드는 변경되지 않습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
}

impl ProductUpdate {
    pub fn to_fields(&self) -> AppResult<Document> {
        Ok(bson::to_document(self)?)
    }
}
