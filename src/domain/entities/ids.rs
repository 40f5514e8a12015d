//! 엔티티별 식별자 타입
//!
//! 모든 문서 ID는 MongoDB `ObjectId`이지만, 엔티티마다 별도의 타입으로 감싸서
//! `UserId` 자리에 `CategoryId`를 넘기는 실수를 컴파일 타임에 막습니다.
//! 직렬화 형태는 `ObjectId`와 동일합니다 (`#[serde(transparent)]`).

use std::fmt;
use std::str::FromStr;

use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

macro_rules! object_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(ObjectId);

        impl $name {
            /// 새 식별자를 생성합니다.
            pub fn generate() -> Self {
                Self(ObjectId::new())
            }

            pub fn as_object_id(&self) -> ObjectId {
                self.0
            }

            pub fn to_hex(&self) -> String {
                self.0.to_hex()
            }
        }

        impl From<ObjectId> for $name {
            fn from(id: ObjectId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<$name> for Bson {
            fn from(id: $name) -> Self {
                Bson::ObjectId(id.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ObjectId::parse_str(s).map(Self).map_err(|_| {
                    AppError::ValidationError(format!(
                        "유효하지 않은 {} 형식입니다: {}",
                        stringify!($name),
                        s
                    ))
                })
            }
        }
    };
}

object_id_type!(
    /// 상품 문서 ID
    ProductId
);

object_id_type!(
    /// 사용자 문서 ID
    UserId
);

object_id_type!(
    /// 카테고리 문서 ID (이 크레이트는 카테고리 스키마를 정의하지 않음)
    CategoryId
);
