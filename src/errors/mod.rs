//! 에러 타입 모듈
//!
//! [`AppError`]와 [`AppResult`]를 크레이트 루트에서 바로 쓸 수 있도록 재노출합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
