//! Users Entity Module
//!
//! 사용자 엔티티([`User`](user::User))와 스키마를 정의합니다.

pub mod user;

pub use user::User;
