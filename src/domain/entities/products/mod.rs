//! Products Entity Module
//!
//! 상품 엔티티([`Product`](product::Product))와 스키마를 정의합니다.

pub mod product;

pub use product::Product;
