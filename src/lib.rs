//! 상품/사용자 데이터 모델링 라이브러리
//!
//! MongoDB 문서 위에 선언적 스키마를 얹어, 저장 전에 캐스팅과 검증을 수행하는
//! 객체-문서 매핑 계층입니다. 상품(`Product`)과 할 일 앱 사용자(`User`) 두 모델을 정의합니다.
//!
//! # Features
//!
//! - **선언적 스키마**: 필드 타입, required / unique / lowercase 제약, 기본값, 참조
//! - **캐스팅**: `"10"` → `10.0`, 16진 문자열 → ObjectId, 스키마에 없는 키 제거
//! - **타임스탬프**: `createdAt` / `updatedAt` 자동 관리
//! - **명시적 레지스트리**: 전역 상태 없이 생성해서 넘겨 쓰는 `ModelRegistry`
//! - **저장소 추상화**: MongoDB 구현과 테스트용 인메모리 구현
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Repositories   │ ← 타입이 있는 입력 (DTO)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ModelRegistry   │ ← 모델 등록, 참조 해석, 인덱스 초기화
//! │   Model<T>      │ ← 캐스팅, 검증, 타임스탬프
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ DocumentStore   │ ← MongoDB / Memory (유니크 제약)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use data_modelling::core::ModelRegistry;
//! use data_modelling::db::MemoryStore;
//! use data_modelling::domain::{NewUser, Product, User};
//! use data_modelling::repositories::UserRepository;
//!
//! let registry = Arc::new(ModelRegistry::new(Arc::new(MemoryStore::new())));
//! registry.register::<Product>().await?;
//! registry.register::<User>().await?;
//!
//! let users = UserRepository::new(&registry)?;
//! let alice = users.create(NewUser::new("Alice", "Alice@Example.com", "secret")).await?;
//! assert_eq!(alice.username, "alice");
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repositories;
