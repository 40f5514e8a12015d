//! # Model - 스키마에 묶인 문서 팩토리
//!
//! [`Model<T>`]는 하나의 [`Schema`]와 하나의 [`DocumentStore`]를 묶어
//! 엔티티 `T`의 생성, 조회, 부분 수정, 삭제를 제공합니다.
//!
//! ## 생성 흐름
//!
//! ```text
//! 필드 매핑 ──▶ Schema::cast_new ──▶ _id 생성 ──▶ createdAt/updatedAt ──▶ __v = 0
//!                 │ (strict, 캐스팅,                                         │
//!                 │  lowercase, 기본값,                                      ▼
//!                 │  required 검사)                              DocumentStore::insert
//!                 ▼                                                (유니크 검사)
//!        MissingRequiredField / TypeMismatch                             │
//!                                                                        ▼
//!                                                                 T 로 디코딩
//! ```
//!
//! 모델은 [`ModelRegistry::register`](crate::core::registry::ModelRegistry::register)로
//! 얻는 것이 일반적입니다.

use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, info};
use mongodb::bson::{self, oid::ObjectId, DateTime, Document};

use crate::db::store::DocumentStore;
use crate::domain::entities::Entity;
use crate::domain::schema::{fields_from_json, Schema, CREATED_AT, ID_FIELD, UPDATED_AT, VERSION_KEY};
use crate::errors::AppResult;

/// 엔티티 `T`의 문서 팩토리
pub struct Model<T: Entity> {
    schema: Arc<Schema>,
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Model<T> {
    pub(crate) fn new(schema: Arc<Schema>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            schema,
            store,
            _entity: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn collection(&self) -> &str {
        self.schema.collection()
    }

    /// 필드-값 매핑으로 새 문서를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `MissingRequiredField` - 필수 필드가 없거나 비어 있음
    /// * `TypeMismatch` - 값을 선언된 타입으로 변환할 수 없음
    /// * `UniquenessViolation` - 유니크 필드가 기존 문서와 충돌
    pub async fn create(&self, fields: Document) -> AppResult<T> {
        let cast = self.schema.cast_new(&fields)?;

        let id = ObjectId::new();
        let mut document = Document::new();
        document.insert(ID_FIELD, id);
        for (path, value) in cast {
            document.insert(path, value);
        }
        if self.schema.has_timestamps() {
            let now = DateTime::now();
            document.insert(CREATED_AT, now);
            document.insert(UPDATED_AT, now);
        }
        document.insert(VERSION_KEY, 0_i32);

        self.store.insert(self.collection(), document.clone()).await?;
        debug!("{}: 문서 생성 {}", self.schema.model_name(), id);

        Self::decode(document)
    }

    /// JSON 객체로 새 문서를 만듭니다. 객체가 아니면 `ValidationError`입니다.
    pub async fn create_from_json(&self, fields: serde_json::Value) -> AppResult<T> {
        self.create(fields_from_json(fields)?).await
    }

    pub async fn find_by_id(&self, id: T::Id) -> AppResult<Option<T>> {
        let document = self.store.find_by_id(self.collection(), id.into()).await?;
        document.map(Self::decode).transpose()
    }

    /// 부분 수정을 적용하고 수정된 엔티티를 반환합니다.
    ///
    /// 입력에 포함된 스키마 경로만 변경되며 `updatedAt`은 항상 갱신됩니다.
    /// 문서가 없으면 `Ok(None)`입니다.
    pub async fn update(&self, id: T::Id, fields: Document) -> AppResult<Option<T>> {
        let mut changes = self.schema.cast_update(&fields)?;
        if self.schema.has_timestamps() {
            changes.insert(UPDATED_AT, DateTime::now());
        }
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = self
            .store
            .update_by_id(self.collection(), id.into(), changes)
            .await?;
        debug!("{}: 문서 수정 {} (found: {})", self.schema.model_name(), id, updated.is_some());

        updated.map(Self::decode).transpose()
    }

    /// JSON 객체로 부분 수정을 적용합니다.
    pub async fn update_from_json(&self, id: T::Id, fields: serde_json::Value) -> AppResult<Option<T>> {
        self.update(id, fields_from_json(fields)?).await
    }

    /// 문서를 삭제합니다. 삭제된 문서가 있으면 `true`.
    pub async fn delete(&self, id: T::Id) -> AppResult<bool> {
        let deleted = self.store.delete_by_id(self.collection(), id.into()).await?;
        debug!("{}: 문서 삭제 {} (deleted: {})", self.schema.model_name(), id, deleted);
        Ok(deleted)
    }

    /// 스키마의 유니크 필드마다 저장소에 유니크 인덱스를 선언합니다.
    pub async fn ensure_indexes(&self) -> AppResult<usize> {
        ensure_schema_indexes(self.store.as_ref(), &self.schema).await
    }

    fn decode(document: Document) -> AppResult<T> {
        Ok(bson::from_document(document)?)
    }
}

/// 스키마의 유니크 필드에 대한 인덱스를 만들고 그 수를 반환합니다.
pub(crate) async fn ensure_schema_indexes(store: &dyn DocumentStore, schema: &Schema) -> AppResult<usize> {
    let mut count = 0;
    for field in schema.unique_fields() {
        store.ensure_unique_index(schema.collection(), field.name()).await?;
        count += 1;
    }
    if count > 0 {
        info!(
            "{}: 유니크 인덱스 {}개 확인 ({})",
            schema.model_name(),
            count,
            store.name()
        );
    }
    Ok(count)
}
