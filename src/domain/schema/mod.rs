//! # Schema Module
//!
//! 엔티티의 필드, 타입, 제약 조건을 선언적으로 기술하는 스키마 계층입니다.
//!
//! ## 구성
//!
//! - [`field`] - 필드 선언 ([`Field`], [`FieldType`])
//! - [`schema`] - 스키마 빌더와 컬렉션 이름 규칙
//! - [`cast`] - 입력 매핑의 캐스팅과 필드 수준 검증
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::schema::{Field, Schema};
//!
//! let schema = Schema::builder("User")
//!     .field(Field::string("username").required().unique().lowercase())
//!     .field(Field::string("password").required())
//!     .timestamps()
//!     .build()?;
//!
//! let fields = schema.cast_new(&doc! { "username": "Alice", "password": "pw" })?;
//! assert_eq!(fields.get_str("username")?, "alice");
//! ```

pub mod cast;
pub mod field;
pub mod schema;

pub use cast::fields_from_json;
pub use field::{Field, FieldType};
pub use schema::{default_collection_name, Schema, SchemaBuilder, CREATED_AT, ID_FIELD, UPDATED_AT, VERSION_KEY};
