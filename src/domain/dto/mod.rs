//! # Data Transfer Objects
//!
//! 엔티티 생성/수정에 쓰이는 타입이 있는 입력 구조체입니다.
//! 모든 DTO는 스키마가 받는 평범한 필드-값 매핑(BSON 문서)으로 직렬화되며,
//! 값이 없는 선택 필드는 매핑에서 빠집니다.
//!
//! 필드 제약(필수, 유니크, 소문자)은 DTO가 아니라 스키마가 검증합니다.
//! 따라서 `NewProduct { name: "".into(), .. }` 도 생성 단계에서 거부됩니다.

pub mod products;
pub mod users;

pub use products::{NewProduct, ProductUpdate};
pub use users::{NewUser, UserUpdate};
