//! Product Entity Implementation
//!
//! 판매 가능한 상품을 표현하는 엔티티와 스키마입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::ids::{CategoryId, ProductId, UserId};
use crate::domain::entities::Entity;
use crate::domain::schema::{Field, Schema};
use crate::errors::AppResult;

/// 상품 엔티티
///
/// `products` 컬렉션의 문서와 1:1로 대응합니다.
/// `category`와 `owner`는 소유 관계가 없는 약한 참조입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// 상품명
    pub name: String,
    /// 가격
    pub price: f64,
    /// 상품 설명
    pub description: String,
    /// 상품 이미지 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    /// 재고 수량 (기본값 0)
    #[serde(default)]
    pub stock: f64,
    /// 소속 카테고리
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// 등록한 사용자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Entity for Product {
    const MODEL_NAME: &'static str = "Product";
    type Id = ProductId;

    /// `name`, `price`, `description`은 필수이며 `stock`의 기본값은 0입니다.
    /// `price`는 기본값 없이 필수로만 선언합니다.
    fn schema() -> AppResult<Schema> {
        Schema::builder(Self::MODEL_NAME)
            .field(Field::string("name").required())
            .field(Field::number("price").required())
            .field(Field::string("description").required())
            .field(Field::string("productImage"))
            .field(Field::number("stock").default_value(0.0))
            .field(Field::object_id("category").reference("Category"))
            .field(Field::object_id("owner").reference("User"))
            .timestamps()
            .build()
    }

    fn id(&self) -> ProductId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FieldType;

    #[test]
    fn test_product_schema_shape() {
        let schema = Product::schema().unwrap();

        assert_eq!(schema.collection(), "products");
        assert!(schema.has_timestamps());

        let required: Vec<_> = schema
            .fields()
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name())
            .collect();
        assert_eq!(required, vec!["name", "price", "description"]);

        let price = schema.field("price").unwrap();
        assert!(price.default().is_none());
        assert_eq!(price.field_type(), FieldType::Number);

        assert_eq!(schema.field("owner").unwrap().reference_target(), Some("User"));
        assert_eq!(schema.field("category").unwrap().reference_target(), Some("Category"));
        assert_eq!(schema.unique_fields().count(), 0);
    }

    #[test]
    fn test_deserialize_from_stored_document() {
        let id = ProductId::generate();
        let now = DateTime::now();
        let stored = mongodb::bson::doc! {
            "_id": id,
            "name": "Pen",
            "price": 10.0,
            "description": "Blue pen",
            "stock": 0.0,
            "createdAt": now,
            "updatedAt": now,
            "__v": 0,
        };

        let product: Product = mongodb::bson::from_document(stored).unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.product_image, None);
        assert_eq!(product.owner, None);
        assert_eq!(product.created_at, now);
    }
}
