//! 문서 저장소 추상화
//!
//! 모델 계층이 사용하는 영속성 협력자(persistence collaborator)의 인터페이스입니다.
//! 저장소는 컬렉션 이름과 `_id` 단위로 문서를 다루며, 유니크 인덱스로 선언된 필드의
//! 충돌 검사를 쓰기 연산과 원자적으로 수행해야 합니다.
//!
//! ## 구현체
//!
//! - [`MongoStore`](crate::db::mongo_store::MongoStore) - MongoDB 드라이버 기반
//! - [`MemoryStore`](crate::db::memory_store::MemoryStore) - 프로세스 내 저장소 (테스트, 로컬 실행)

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::errors::AppResult;

/// 문서 저장소 인터페이스
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 로그에 표시할 저장소 이름
    fn name(&self) -> &str;

    /// 문서를 삽입합니다. 문서에는 `_id`가 이미 채워져 있어야 합니다.
    ///
    /// # Errors
    ///
    /// * `UniquenessViolation` - 유니크 인덱스 필드가 다른 문서와 충돌
    async fn insert(&self, collection: &str, document: Document) -> AppResult<()>;

    /// `_id`로 문서를 조회합니다.
    async fn find_by_id(&self, collection: &str, id: ObjectId) -> AppResult<Option<Document>>;

    /// `changes`의 필드들을 덮어쓰고(`$set`) 수정된 문서를 반환합니다.
    ///
    /// 문서가 없으면 `Ok(None)`입니다.
    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> AppResult<Option<Document>>;

    /// 문서를 삭제합니다. 삭제된 문서가 있으면 `true`.
    async fn delete_by_id(&self, collection: &str, id: ObjectId) -> AppResult<bool>;

    /// `field`에 유니크 인덱스를 선언합니다. 이미 있으면 아무 일도 하지 않습니다.
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> AppResult<()>;
}
