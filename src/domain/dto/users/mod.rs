//! 사용자 입력 DTO

pub mod request;

pub use request::{NewUser, UserUpdate};
