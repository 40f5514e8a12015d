//! # Domain Layer Module
//!
//! 저장되는 데이터의 모양을 정의하는 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Schema    - 필드 선언, 제약 조건, 캐스팅 규칙
//! ├── Entities  - 저장된 문서와 1:1로 대응하는 타입 (Product, User)
//! └── DTOs      - 생성/수정 입력 (NewProduct, UserUpdate ...)
//!      │
//!      ▼
//! Core (Model, ModelRegistry) ──▶ DocumentStore (MongoDB / Memory)
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`schema`] - 스키마 선언
//!
//! 필드 이름과 타입, `required` / `unique` / `lowercase` 제약, 기본값,
//! 다른 모델을 가리키는 참조를 선언합니다.
//!
//! ```rust,ignore
//! let schema = Schema::builder("User")
//!     .field(Field::string("username").required().unique().lowercase())
//!     .field(Field::string("password").required())
//!     .timestamps()
//!     .build()?;
//! ```
//!
//! ### [`entities`] - 도메인 엔티티
//!
//! 각 엔티티는 [`Entity`](entities::Entity) 트레이트로 자신의 스키마와 ID 타입을 밝힙니다.
//! ID는 `ProductId`, `UserId`, `CategoryId`처럼 타입으로 구분되어
//! 서로 다른 컬렉션의 ID를 섞어 쓰는 실수를 컴파일 단계에서 막습니다.
//!
//! ### [`dto`] - 입력 객체
//!
//! 타입이 있는 생성/수정 입력입니다. 스키마가 받는 평범한 필드 매핑으로 직렬화되며,
//! 값이 없는 `Option` 필드는 매핑에서 빠집니다.

pub mod dto;
pub mod entities;
pub mod schema;

pub use dto::{NewProduct, NewUser, ProductUpdate, UserUpdate};
pub use entities::ids::{CategoryId, ProductId, UserId};
pub use entities::products::Product;
pub use entities::users::User;
pub use entities::Entity;
