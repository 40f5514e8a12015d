//! # 상품 리포지토리 구현
//!
//! 상품 엔티티의 CRUD와 참조(`owner`, `category`) 해석을 담당합니다.

use std::sync::Arc;

use log::debug;
use mongodb::bson::Document;

use crate::core::{Model, ModelRegistry};
use crate::domain::dto::{NewProduct, ProductUpdate};
use crate::domain::entities::ids::ProductId;
use crate::domain::entities::products::Product;
use crate::domain::entities::users::User;
use crate::errors::AppResult;

/// 상품 데이터 액세스 리포지토리
///
/// `owner`는 등록된 `User` 모델로 디코딩하고, `category`는 이 크레이트가
/// 모델을 정의하지 않으므로 원본 문서 그대로 돌려줍니다.
///
/// ```rust,ignore
/// let repo = ProductRepository::new(&registry)?;
/// let pen = repo.create(NewProduct {
///     name: "Pen".to_string(),
///     price: 10.0,
///     description: "Blue pen".to_string(),
///     ..Default::default()
/// }).await?;
/// assert_eq!(pen.stock, 0.0);
/// ```
pub struct ProductRepository {
    registry: Arc<ModelRegistry>,
    model: Arc<Model<Product>>,
}

impl ProductRepository {
    /// # Errors
    ///
    /// * `NotFound` - `Product` 모델이 등록되지 않음
    pub fn new(registry: &Arc<ModelRegistry>) -> AppResult<Self> {
        Ok(Self {
            registry: registry.clone(),
            model: registry.model::<Product>()?,
        })
    }

    pub async fn create(&self, input: NewProduct) -> AppResult<Product> {
        let product = self.model.create(input.to_fields()?).await?;
        debug!("상품 생성: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.model.find_by_id(id).await
    }

    pub async fn update(&self, id: ProductId, input: ProductUpdate) -> AppResult<Option<Product>> {
        self.model.update(id, input.to_fields()?).await
    }

    pub async fn delete(&self, id: ProductId) -> AppResult<bool> {
        self.model.delete(id).await
    }

    /// 상품을 등록한 사용자
    ///
    /// `owner`가 비어 있거나 가리키는 사용자가 없으면 `None`입니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - `User` 모델이 등록되지 않음
    pub async fn owner(&self, product: &Product) -> AppResult<Option<User>> {
        match product.owner {
            Some(owner) => self.registry.populate::<User>(owner).await,
            None => Ok(None),
        }
    }

    /// 상품이 속한 카테고리 문서
    pub async fn category(&self, product: &Product) -> AppResult<Option<Document>> {
        match product.category {
            Some(category) => {
                self.registry
                    .resolve_reference(self.model.schema(), "category", category.into())
                    .await
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::domain::dto::NewUser;
    use crate::domain::entities::ids::{CategoryId, UserId};
    use crate::errors::AppError;
    use crate::repositories::UserRepository;
    use mongodb::bson::doc;

    struct Fixture {
        store: Arc<MemoryStore>,
        products: ProductRepository,
        users: UserRepository,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let registry = Arc::new(ModelRegistry::new(store.clone()));
        registry.register::<Product>().await.unwrap();
        registry.register::<User>().await.unwrap();

        Fixture {
            store,
            users: UserRepository::new(&registry).unwrap(),
            products: ProductRepository::new(&registry).unwrap(),
        }
    }

    fn pen() -> NewProduct {
        NewProduct {
            name: "Pen".to_string(),
            price: 10.0,
            description: "Blue pen".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pen_round_trip() {
        let f = fixture().await;
        let created = f.products.create(pen()).await.unwrap();

        assert_eq!(created.name, "Pen");
        assert_eq!(created.price, 10.0);
        assert_eq!(created.stock, 0.0);
        assert_eq!(created.product_image, None);
        assert_eq!(created.created_at, created.updated_at);

        let found = f.products.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_required_fields_are_enforced() {
        let f = fixture().await;

        let without_name = NewProduct { name: String::new(), ..pen() };
        let without_description = NewProduct { description: String::new(), ..pen() };

        for (input, missing) in [(without_name, "name"), (without_description, "description")] {
            let result = f.products.create(input).await;
            assert!(matches!(
                result,
                Err(AppError::MissingRequiredField { ref field, .. }) if field == missing
            ));
        }
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let f = fixture().await;
        let created = f.products.create(pen()).await.unwrap();

        let update = ProductUpdate {
            stock: Some(25.0),
            ..Default::default()
        };
        let updated = f.products.update(created.id, update).await.unwrap().unwrap();

        assert_eq!(updated.stock, 25.0);
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_owner_resolves_to_user() {
        let f = fixture().await;
        let owner = f
            .users
            .create(NewUser::new("Alice", "alice@example.com", "pw"))
            .await
            .unwrap();

        let product = f
            .products
            .create(NewProduct { owner: Some(owner.id), ..pen() })
            .await
            .unwrap();

        let resolved = f.products.owner(&product).await.unwrap().unwrap();
        assert_eq!(resolved, owner);
    }

    #[tokio::test]
    async fn test_dangling_references_resolve_to_none() {
        let f = fixture().await;
        let product = f
            .products
            .create(NewProduct {
                owner: Some(UserId::generate()),
                category: Some(CategoryId::generate()),
                ..pen()
            })
            .await
            .unwrap();

        assert!(f.products.owner(&product).await.unwrap().is_none());
        assert!(f.products.category(&product).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_category_resolves_to_raw_document() {
        let f = fixture().await;
        let category_id = f.store.seed("categories", doc! { "name": "Stationery" }).unwrap();

        let product = f
            .products
            .create(NewProduct {
                category: Some(category_id.into()),
                ..pen()
            })
            .await
            .unwrap();

        let category = f.products.category(&product).await.unwrap().unwrap();
        assert_eq!(category.get_str("name").unwrap(), "Stationery");
    }

    #[tokio::test]
    async fn test_delete_product() {
        let f = fixture().await;
        let product = f.products.create(pen()).await.unwrap();

        assert!(f.products.delete(product.id).await.unwrap());
        assert!(!f.products.delete(product.id).await.unwrap());
        assert_eq!(f.store.count("products").unwrap(), 0);
    }
}
