//! MongoDB 문서 저장소
//!
//! [`Database`] 연결 위에서 [`DocumentStore`]를 구현합니다.
//! 유니크 제약은 `{field}_unique` 이름의 유니크 인덱스로 강제되며,
//! 중복 키 에러(코드 11000)는 `UniquenessViolation`으로 변환됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::store::DocumentStore;
use crate::db::Database;
use crate::domain::schema::ID_FIELD;
use crate::errors::{AppError, AppResult};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY: i32 = 11000;

/// 같은 이름 또는 같은 키의 인덱스가 다른 옵션으로 이미 존재함
const INDEX_OPTIONS_CONFLICT: i32 = 85;
const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

/// 유니크 인덱스 이름 접미사
const UNIQUE_INDEX_SUFFIX: &str = "_unique";

/// MongoDB 기반 [`DocumentStore`]
pub struct MongoStore {
    db: Arc<Database>,
}

impl MongoStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.get_database().collection::<Document>(name)
    }

    /// 드라이버 에러를 변환합니다. 중복 키 에러는 충돌한 필드와 값을 찾아
    /// `UniquenessViolation`으로 바꿉니다.
    fn map_write_error(
        collection: &str,
        attempted: &Document,
        error: mongodb::error::Error,
    ) -> AppError {
        let message = match error.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => {
                Some(e.message.as_str())
            }
            ErrorKind::Command(e) if e.code == DUPLICATE_KEY => Some(e.message.as_str()),
            _ => None,
        };

        let Some(message) = message else {
            return AppError::DatabaseError(error.to_string());
        };

        let field = duplicate_key_field(message).unwrap_or_else(|| "unknown".to_string());
        let value = attempted
            .get(&field)
            .map(|v| match v {
                Bson::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "?".to_string());

        AppError::UniquenessViolation {
            collection: collection.to_string(),
            field,
            value,
        }
    }
}

/// 중복 키 에러 메시지에서 인덱스 이름을 찾아 필드 이름으로 되돌립니다.
///
/// ```text
/// E11000 duplicate key error collection: shop.users index: username_unique dup key: { username: "alice" }
/// ```
///
/// `{field}_unique`와 드라이버 기본 이름 `{field}_1`을 모두 인식합니다.
fn duplicate_key_field(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("index: ")?;
    let index_name = rest.split_whitespace().next()?;

    let field = index_name
        .strip_suffix(UNIQUE_INDEX_SUFFIX)
        .or_else(|| index_name.strip_suffix("_1"))
        .unwrap_or(index_name);

    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn insert(&self, collection: &str, document: Document) -> AppResult<()> {
        self.collection(collection)
            .insert_one(&document)
            .await
            .map_err(|e| Self::map_write_error(collection, &document, e))?;

        debug!("mongodb: {} 에 문서 삽입", collection);
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> AppResult<Option<Document>> {
        let document = self
            .collection(collection)
            .find_one(doc! { ID_FIELD: id })
            .await?;

        Ok(document)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> AppResult<Option<Document>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection(collection)
            .find_one_and_update(doc! { ID_FIELD: id }, doc! { "$set": changes.clone() })
            .with_options(options)
            .await
            .map_err(|e| Self::map_write_error(collection, &changes, e))
    }

    async fn delete_by_id(&self, collection: &str, id: ObjectId) -> AppResult<bool> {
        let result = self
            .collection(collection)
            .delete_one(doc! { ID_FIELD: id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(format!("{}{}", field, UNIQUE_INDEX_SUFFIX))
                    .build(),
            )
            .build();

        match self.collection(collection).create_index(index).await {
            Ok(_) => {
                info!("📇 유니크 인덱스 확인: {}.{}", collection, field);
                Ok(())
            }
            Err(e) => match e.kind.as_ref() {
                ErrorKind::Command(c)
                    if c.code == INDEX_OPTIONS_CONFLICT || c.code == INDEX_KEY_SPECS_CONFLICT =>
                {
                    warn!(
                        "{}.{}: 기존 인덱스와 옵션이 달라 그대로 둡니다 ({})",
                        collection, field, c.message
                    );
                    Ok(())
                }
                _ => Err(Self::map_write_error(collection, &Document::new(), e)),
            },
        }
    }
}
