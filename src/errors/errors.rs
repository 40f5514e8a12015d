//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 스키마 정의, 필드 캐스팅, 문서 저장소 연산에서 발생하는 모든 에러를
//! 하나의 `AppError`로 통합합니다. `thiserror`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | AppError | 발생 시점 |
//! |----------|-----------|
//! | `MissingRequiredField` | 필수 필드 누락 (생성/수정) |
//! | `UniquenessViolation` | 유니크 필드 충돌 (저장소) |
//! | `TypeMismatch` | 선언된 타입으로 캐스팅 불가 |
//! | `InvalidSchema` | 잘못된 스키마 선언, 중복 모델 등록 |
//! | `ValidationError` | 잘못된 ID 형식, 객체가 아닌 입력 |
//! | `NotFound` | 등록되지 않은 모델 |
//! | `DatabaseError` | MongoDB 연산 실패 |
//! | `ConfigError` | 환경 설정 검증 실패 |
//! | `InternalError` | 예상치 못한 내부 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! match products.create(fields).await {
//!     Err(AppError::MissingRequiredField { field, .. }) => println!("{} 필드가 필요합니다", field),
//!     Err(e) => return Err(e),
//!     Ok(product) => println!("생성됨: {}", product.id),
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 스키마 계층과 저장소 계층에서 발생할 수 있는 모든 종류의 에러를 포괄합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 생성 또는 수정 시 필수 필드가 비어 있음
    #[error("Missing required field: {model}.{field}")]
    MissingRequiredField { model: String, field: String },

    /// 유니크 필드 값이 다른 문서와 충돌
    #[error("Uniqueness violation: {collection}.{field} = {value} already exists")]
    UniquenessViolation {
        collection: String,
        field: String,
        value: String,
    },

    /// 입력값을 선언된 타입으로 변환할 수 없음
    #[error("Type mismatch: {model}.{field} expects {expected}, got {actual}")]
    TypeMismatch {
        model: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// 스키마 선언 오류
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// 입력값 검증 에러
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러
    #[error("Not found: {0}")]
    NotFound(String),

    /// 데이터베이스 관련 에러
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 에러
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(e: mongodb::bson::de::Error) -> Self {
        AppError::InternalError(format!("문서 디코딩 실패: {}", e))
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("문서 인코딩 실패: {}", e))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
