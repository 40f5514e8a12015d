//! # Model Registry - 명시적 모델 레지스트리
//!
//! 스키마를 컴파일하여 타입이 있는 [`Model`]을 만들고, 모델 이름과 Rust 타입으로
//! 찾아 쓸 수 있게 보관합니다.
//!
//! 전역 싱글톤이 아니라 생성자로 만든 값을 `Arc`로 넘겨 쓰는 구조이므로,
//! 저장소가 다른 레지스트리 여러 개가 한 프로세스에 공존할 수 있습니다 (테스트마다 하나씩).
//!
//! ## 구성
//!
//! | 보관 항목 | 키 | 용도 |
//! |-----------|----|------|
//! | 스키마 | 모델 이름 (`"User"`) | 참조 해석, 인덱스 초기화 |
//! | 모델 인스턴스 | `TypeId` | `model::<User>()` 조회 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ModelRegistry;
//! use crate::db::MemoryStore;
//!
//! let registry = Arc::new(ModelRegistry::new(Arc::new(MemoryStore::new())));
//! registry.register::<Product>().await?;   // 유니크 인덱스도 함께 생성
//! registry.register::<User>().await?;
//!
//! let users = registry.model::<User>()?;
//! let alice = users.create(doc! { "username": "Alice", "email": "a@x.io", "password": "pw" }).await?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;
use mongodb::bson::{oid::ObjectId, Document};

use crate::core::model::{ensure_schema_indexes, Model};
use crate::db::store::DocumentStore;
use crate::domain::entities::Entity;
use crate::domain::schema::{default_collection_name, Schema};
use crate::errors::{AppError, AppResult};

/// 명시적으로 전달되는 모델 레지스트리
pub struct ModelRegistry {
    /// 모든 모델이 공유하는 문서 저장소
    store: Arc<dyn DocumentStore>,
    /// 등록 시 유니크 인덱스 자동 생성 여부 (기본값 `true`)
    auto_index: bool,
    /// 모델 이름 → 컴파일된 스키마
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
    /// 엔티티 타입 → `Arc<Model<T>>`
    models: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ModelRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            auto_index: true,
            schemas: RwLock::new(HashMap::new()),
            models: RwLock::new(HashMap::new()),
        }
    }

    /// 등록 시 인덱스 생성을 끄거나 켭니다.
    ///
    /// 끄면 유니크 제약은 이미 존재하는 인덱스나 [`initialize_all`](Self::initialize_all)
    /// 호출에 의존합니다.
    pub fn with_auto_index(mut self, auto_index: bool) -> Self {
        self.auto_index = auto_index;
        self
    }

    /// 엔티티의 스키마를 컴파일하고 모델을 등록합니다.
    ///
    /// 자동 인덱스가 켜져 있으면 모델을 돌려주기 전에 유니크 인덱스를 먼저 만듭니다.
    /// 따라서 등록 직후의 생성/수정부터 유일성이 보장됩니다.
    ///
    /// # Errors
    ///
    /// * `InvalidSchema` - 스키마 선언 오류, 또는 같은 모델 이름이 이미 등록됨
    /// * `UniquenessViolation` - 기존 문서끼리 이미 중복되어 인덱스를 만들 수 없음
    pub async fn register<T: Entity>(&self) -> AppResult<Arc<Model<T>>> {
        let schema = Arc::new(T::schema()?);
        if schema.model_name() != T::MODEL_NAME {
            return Err(AppError::InvalidSchema(format!(
                "스키마 이름 {} 이 모델 이름 {} 과 다릅니다",
                schema.model_name(),
                T::MODEL_NAME
            )));
        }

        let registered = read_lock(&self.schemas)?.contains_key(T::MODEL_NAME);
        if registered {
            return Err(already_registered(T::MODEL_NAME));
        }

        if self.auto_index {
            ensure_schema_indexes(self.store.as_ref(), &schema).await?;
        }

        let model = Arc::new(Model::<T>::new(schema.clone(), self.store.clone()));
        {
            let mut schemas = write_lock(&self.schemas)?;
            // 인덱스를 만드는 동안 같은 이름이 먼저 등록되었을 수 있음
            if schemas.contains_key(T::MODEL_NAME) {
                return Err(already_registered(T::MODEL_NAME));
            }
            write_lock(&self.models)?.insert(
                TypeId::of::<T>(),
                model.clone() as Arc<dyn Any + Send + Sync>,
            );
            schemas.insert(T::MODEL_NAME.to_string(), schema.clone());
        }

        info!("📦 모델 등록: {} → {}", T::MODEL_NAME, schema.collection());
        Ok(model)
    }

    /// 등록된 모델을 타입으로 조회합니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - `T`가 등록되지 않음
    pub fn model<T: Entity>(&self) -> AppResult<Arc<Model<T>>> {
        let models = read_lock(&self.models)?;
        let instance = models
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("등록되지 않은 모델: {}", T::MODEL_NAME)))?;

        instance.downcast::<Model<T>>().map_err(|_| {
            AppError::InternalError(format!("모델 타입 불일치: {}", T::MODEL_NAME))
        })
    }

    /// 모델 이름으로 스키마를 조회합니다.
    pub fn schema(&self, model_name: &str) -> Option<Arc<Schema>> {
        read_lock(&self.schemas)
            .ok()
            .and_then(|schemas| schemas.get(model_name).cloned())
    }

    /// 등록된 모델 이름 목록 (정렬됨)
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read_lock(&self.schemas)
            .map(|schemas| schemas.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// 모델의 컬렉션 이름
    ///
    /// 등록된 모델은 스키마의 컬렉션을, 등록되지 않은 모델(예: `Category`)은
    /// 기본 복수형 규칙을 따릅니다.
    pub fn collection_for(&self, model_name: &str) -> String {
        self.schema(model_name)
            .map(|schema| schema.collection().to_string())
            .unwrap_or_else(|| default_collection_name(model_name))
    }

    /// 참조 필드가 가리키는 문서를 조회합니다.
    ///
    /// 참조 대상이 등록되지 않은 모델이어도 컬렉션 이름 규칙으로 찾습니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - `field`가 스키마에 없거나 참조 필드가 아님
    pub async fn resolve_reference(
        &self,
        schema: &Schema,
        field: &str,
        id: ObjectId,
    ) -> AppResult<Option<Document>> {
        let target = schema
            .field(field)
            .and_then(|f| f.reference_target())
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "{}.{} 는 참조 필드가 아닙니다",
                    schema.model_name(),
                    field
                ))
            })?;

        let collection = self.collection_for(target);
        self.store.find_by_id(&collection, id).await
    }

    /// 등록된 모델 `T`의 문서를 ID로 가져옵니다.
    pub async fn populate<T: Entity>(&self, id: T::Id) -> AppResult<Option<T>> {
        self.model::<T>()?.find_by_id(id).await
    }

    /// 등록된 모든 스키마의 유니크 인덱스를 생성합니다.
    ///
    /// 만들어진(또는 이미 존재한) 인덱스 수를 반환합니다.
    pub async fn initialize_all(&self) -> AppResult<usize> {
        let schemas: Vec<Arc<Schema>> = read_lock(&self.schemas)?.values().cloned().collect();

        info!("🔄 모델 {}개 인덱스 초기화 ({})", schemas.len(), self.store.name());

        let mut total = 0;
        for schema in schemas {
            total += ensure_schema_indexes(self.store.as_ref(), &schema).await?;
        }

        info!("✅ 인덱스 초기화 완료: {}개", total);
        Ok(total)
    }
}

fn already_registered(model_name: &str) -> AppError {
    AppError::InvalidSchema(format!("모델 {} 은 이미 등록되어 있습니다", model_name))
}

fn read_lock<T>(lock: &RwLock<T>) -> AppResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| AppError::InternalError("레지스트리 락이 손상되었습니다".to_string()))
}

fn write_lock<T>(lock: &RwLock<T>) -> AppResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| AppError::InternalError("레지스트리 락이 손상되었습니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::domain::entities::products::Product;
    use crate::domain::entities::users::User;
    use mongodb::bson::doc;

    fn registry() -> (Arc<MemoryStore>, ModelRegistry) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), ModelRegistry::new(store))
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let (_, registry) = registry();
        registry.register::<Product>().await.unwrap();
        registry.register::<User>().await.unwrap();

        assert_eq!(registry.model_names(), vec!["Product", "User"]);
        assert_eq!(registry.model::<User>().unwrap().collection(), "users");
        assert_eq!(registry.schema("Product").unwrap().collection(), "products");
        assert!(registry.schema("Order").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let (_, registry) = registry();
        registry.register::<User>().await.unwrap();

        assert!(matches!(
            registry.register::<User>().await,
            Err(AppError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_unregistered_model_is_not_found() {
        let (_, registry) = registry();

        assert!(matches!(registry.model::<Product>(), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_collection_for_unregistered_target() {
        let (_, registry) = registry();

        assert_eq!(registry.collection_for("Category"), "categories");
    }

    #[tokio::test]
    async fn test_uniqueness_holds_right_after_register() {
        let (store, registry) = registry();
        let users = registry.register::<User>().await.unwrap();

        users
            .create(doc! { "username": "alice", "email": "a@x.io", "password": "pw" })
            .await
            .unwrap();
        let duplicate = users
            .create(doc! { "username": "Alice", "email": "A@x.io", "password": "pw" })
            .await;

        assert!(matches!(duplicate, Err(AppError::UniquenessViolation { .. })));
        assert_eq!(store.count("users").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_without_auto_index_defers_to_initialize_all() {
        let store = Arc::new(MemoryStore::new());
        let registry = ModelRegistry::new(store.clone()).with_auto_index(false);
        let users = registry.register::<User>().await.unwrap();

        let fields = doc! { "username": "alice", "email": "a@x.io", "password": "pw" };
        users.create(fields.clone()).await.unwrap();

        assert_eq!(registry.initialize_all().await.unwrap(), 2);
        let duplicate = users.create(fields).await;
        assert!(matches!(duplicate, Err(AppError::UniquenessViolation { .. })));
    }

    #[tokio::test]
    async fn test_initialize_all_is_idempotent() {
        let (_, registry) = registry();
        registry.register::<Product>().await.unwrap();
        registry.register::<User>().await.unwrap();

        assert_eq!(registry.initialize_all().await.unwrap(), 2);
        assert_eq!(registry.initialize_all().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_registries_are_independent() {
        let (_, first) = registry();
        let (_, second) = registry();
        let first_users = first.register::<User>().await.unwrap();
        let second_users = second.register::<User>().await.unwrap();

        let fields = doc! { "username": "alice", "email": "alice@example.com", "password": "pw" };
        first_users.create(fields.clone()).await.unwrap();
        second_users.create(fields).await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_reference_to_unregistered_category() {
        let (store, registry) = registry();
        let products = registry.register::<Product>().await.unwrap();
        let category_id = store.seed("categories", doc! { "name": "Stationery" }).unwrap();

        let category = registry
            .resolve_reference(products.schema(), "category", category_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(category.get_str("name").unwrap(), "Stationery");

        let missing = registry
            .resolve_reference(products.schema(), "category", ObjectId::new())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_resolve_reference_rejects_plain_field() {
        let (_, registry) = registry();
        let products = registry.register::<Product>().await.unwrap();

        let result = registry
            .resolve_reference(products.schema(), "name", ObjectId::new())
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
