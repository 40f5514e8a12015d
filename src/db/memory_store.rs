//! 프로세스 내 문서 저장소
//!
//! 컬렉션마다 `_id` 순으로 정렬된 문서 맵과 유니크 필드 목록을 가집니다.
//! 모든 쓰기는 하나의 쓰기 락 안에서 충돌 검사와 함께 수행되므로
//! 동시에 같은 값을 쓰는 두 요청 중 하나만 성공합니다.
//!
//! 유니크 비교는 MongoDB 유니크 인덱스와 같이 값이 없는 필드를 null로 취급합니다.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::debug;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::db::store::DocumentStore;
use crate::domain::schema::ID_FIELD;
use crate::errors::{AppError, AppResult};

#[derive(Default)]
struct MemoryCollection {
    documents: BTreeMap<ObjectId, Document>,
    unique_fields: Vec<String>,
}

impl MemoryCollection {
    /// `candidate`가 `exclude`를 제외한 다른 문서와 유니크 필드에서 충돌하는지 검사합니다.
    fn check_unique(
        &self,
        collection: &str,
        candidate: &Document,
        exclude: Option<ObjectId>,
    ) -> AppResult<()> {
        for field in &self.unique_fields {
            let value = candidate.get(field).unwrap_or(&Bson::Null);
            let collides = self
                .documents
                .iter()
                .filter(|(id, _)| Some(**id) != exclude)
                .any(|(_, other)| other.get(field).unwrap_or(&Bson::Null) == value);

            if collides {
                return Err(AppError::UniquenessViolation {
                    collection: collection.to_string(),
                    field: field.clone(),
                    value: display_value(value),
                });
            }
        }
        Ok(())
    }
}

/// 에러 메시지용 값 표기. 문자열은 따옴표 없이 그대로 씁니다.
fn display_value(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 메모리 기반 [`DocumentStore`]
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 컬렉션의 문서 수
    pub fn count(&self, collection: &str) -> AppResult<usize> {
        Ok(self
            .read()?
            .get(collection)
            .map(|c| c.documents.len())
            .unwrap_or(0))
    }

    /// 참조 대상 컬렉션을 미리 채울 때 사용합니다. 유니크 검사를 거칩니다.
    pub fn seed(&self, collection: &str, mut document: Document) -> AppResult<ObjectId> {
        let id = match document.get_object_id(ID_FIELD) {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert(ID_FIELD, id);
                id
            }
        };
        self.insert_locked(collection, id, document)?;
        Ok(id)
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, HashMap<String, MemoryCollection>>> {
        self.collections
            .read()
            .map_err(|_| AppError::InternalError("메모리 저장소 락이 손상되었습니다".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, HashMap<String, MemoryCollection>>> {
        self.collections
            .write()
            .map_err(|_| AppError::InternalError("메모리 저장소 락이 손상되었습니다".to_string()))
    }

    fn insert_locked(&self, collection: &str, id: ObjectId, document: Document) -> AppResult<()> {
        let mut collections = self.write()?;
        let target = collections.entry(collection.to_string()).or_default();

        if target.documents.contains_key(&id) {
            return Err(AppError::UniquenessViolation {
                collection: collection.to_string(),
                field: ID_FIELD.to_string(),
                value: id.to_hex(),
            });
        }
        target.check_unique(collection, &document, None)?;
        target.documents.insert(id, document);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, collection: &str, document: Document) -> AppResult<()> {
        let id = document.get_object_id(ID_FIELD).map_err(|_| {
            AppError::ValidationError(format!("{}: 삽입할 문서에 _id가 없습니다", collection))
        })?;

        self.insert_locked(collection, id, document)?;
        debug!("memory: {} 에 {} 삽입", collection, id);
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> AppResult<Option<Document>> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|c| c.documents.get(&id))
            .cloned())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> AppResult<Option<Document>> {
        let mut collections = self.write()?;
        let Some(target) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(existing) = target.documents.get(&id) else {
            return Ok(None);
        };

        let mut updated = existing.clone();
        for (key, value) in changes {
            updated.insert(key, value);
        }

        target.check_unique(collection, &updated, Some(id))?;
        target.documents.insert(id, updated.clone());
        debug!("memory: {} 의 {} 수정", collection, id);
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, collection: &str, id: ObjectId) -> AppResult<bool> {
        let mut collections = self.write()?;
        let removed = collections
            .get_mut(collection)
            .and_then(|c| c.documents.remove(&id))
            .is_some();
        Ok(removed)
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> AppResult<()> {
        let mut collections = self.write()?;
        let target = collections.entry(collection.to_string()).or_default();

        if target.unique_fields.iter().any(|f| f == field) {
            return Ok(());
        }

        // 기존 문서끼리 이미 중복이면 인덱스를 만들 수 없습니다.
        let mut seen: Vec<&Bson> = Vec::with_capacity(target.documents.len());
        for document in target.documents.values() {
            let value = document.get(field).unwrap_or(&Bson::Null);
            if seen.contains(&value) {
                return Err(AppError::UniquenessViolation {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    value: display_value(value),
                });
            }
            seen.push(value);
        }

        target.unique_fields.push(field.to_string());
        debug!("memory: {}.{} 유니크 인덱스 생성", collection, field);
        Ok(())
    }
}
