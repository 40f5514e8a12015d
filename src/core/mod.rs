//! # Core Module
//!
//! 스키마를 실제 문서 연산으로 연결하는 매핑 계층입니다.
//!
//! ### [`model`] - 문서 팩토리
//! - **Model<T>**: 스키마 + 저장소로 엔티티 생성/조회/수정/삭제
//! - **캐스팅**: 필드 매핑을 스키마 규칙에 따라 변환
//! - **타임스탬프**: `createdAt` / `updatedAt` 자동 관리
//!
//! ### [`registry`] - 모델 레지스트리
//! - **ModelRegistry**: 명시적으로 생성하고 전달하는 레지스트리
//! - **참조 해석**: 약한 참조(ObjectId)를 대상 문서로 조회
//! - **인덱스 초기화**: 유니크 필드 인덱스 일괄 생성

pub mod model;
pub mod registry;

pub use model::Model;
pub use registry::ModelRegistry;
