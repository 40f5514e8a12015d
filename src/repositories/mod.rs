//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 [`ModelRegistry`](crate::core::ModelRegistry)에서 자신의 모델을 꺼내
//! 타입이 있는 입력(DTO)을 필드 매핑으로 바꿔 전달합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let users = UserRepository::new(&registry)?;
//! let alice = users.create(NewUser::new("Alice", "alice@example.com", "pw")).await?;
//! ```

pub mod products;
pub mod users;

pub use products::ProductRepository;
pub use users::UserRepository;
