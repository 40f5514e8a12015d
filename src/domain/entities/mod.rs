//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 대응되는 엔티티들을 정의합니다.
//! 각 엔티티는 [`Entity`] trait을 구현하여 자신의 모델 이름, 식별자 타입,
//! 스키마 선언을 제공합니다.
//!
//! ## 엔티티 목록
//!
//! | 엔티티 | 모델 이름 | 컬렉션 | ID 타입 |
//! |--------|-----------|--------|---------|
//! | [`Product`](products::Product) | `Product` | `products` | [`ProductId`](ids::ProductId) |
//! | [`User`](users::User) | `User` | `users` | [`UserId`](ids::UserId) |
//!
//! `Category`는 참조 대상일 뿐 이 크레이트에서 정의하지 않습니다.
//! 참조는 [`CategoryId`](ids::CategoryId)처럼 타입이 있는 ID로만 보관합니다.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::schema::Schema;
use crate::errors::AppResult;

pub mod ids;
pub mod products;
pub mod users;

/// 스키마를 가진 영속 엔티티
///
/// [`ModelRegistry::register`](crate::core::registry::ModelRegistry::register)는
/// 이 trait을 통해 스키마를 컴파일하고 타입이 있는 모델을 만듭니다.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 레지스트리에 등록되는 모델 이름
    const MODEL_NAME: &'static str;

    /// 엔티티 전용 식별자 타입
    type Id: Copy + From<ObjectId> + Into<ObjectId> + fmt::Display + Send + Sync;

    /// 엔티티의 스키마 선언
    fn schema() -> AppResult<Schema>;

    /// 문서 ID
    fn id(&self) -> Self::Id;
}
