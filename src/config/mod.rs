//! # Configuration Module
//!
//! 환경 변수 기반 설정을 중앙에서 관리합니다.
//!
//! - [`data_config`] - 실행 환경([`Environment`])과 MongoDB 연결 설정([`DatabaseConfig`])
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export ENVIRONMENT="development"   # development, test, staging, production
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="data_modelling_dev"
//! export AUTO_INDEX="true"
//! ```
//!
//! `.env`, `.env.dev`, `.env.prod` 파일은 실행 바이너리가 `PROFILE`에 따라 읽습니다.

pub mod data_config;

pub use data_config::*;
