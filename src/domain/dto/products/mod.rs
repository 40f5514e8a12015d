//! 상품 입력 DTO

pub mod request;

pub use request::{NewProduct, ProductUpdate};
