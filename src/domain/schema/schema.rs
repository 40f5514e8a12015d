//! 스키마 선언과 빌더
//!
//! 하나의 모델(엔티티)이 가지는 필드 목록, 타임스탬프 여부, 저장될 컬렉션 이름을
//! 정의합니다. 같은 경로를 두 번 선언하는 스키마는 `build` 단계에서 거부됩니다.

use std::collections::HashSet;

use crate::domain::schema::field::{Field, FieldType};
use crate::errors::{AppError, AppResult};

/// 문서 ID 필드
pub const ID_FIELD: &str = "_id";
/// 생성 시각 필드 (timestamps 활성화 시)
pub const CREATED_AT: &str = "createdAt";
/// 수정 시각 필드 (timestamps 활성화 시)
pub const UPDATED_AT: &str = "updatedAt";
/// 버전 키 필드
pub const VERSION_KEY: &str = "__v";

/// 컴파일된 스키마
///
/// 필드는 선언 순서를 유지하며, 캐스팅과 검증도 이 순서로 진행됩니다.
#[derive(Debug, Clone)]
pub struct Schema {
    model_name: String,
    collection: String,
    fields: Vec<Field>,
    timestamps: bool,
}

impl Schema {
    pub fn builder(model_name: &str) -> SchemaBuilder {
        SchemaBuilder {
            model_name: model_name.to_string(),
            collection: None,
            fields: Vec::new(),
            timestamps: false,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_timestamps(&self) -> bool {
        self.timestamps
    }

    /// 유니크 제약이 걸린 필드들
    pub fn unique_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.unique)
    }

    /// 관리 필드(`_id`, 타임스탬프, 버전 키)인지 확인합니다.
    pub(crate) fn is_managed_path(&self, path: &str) -> bool {
        path == ID_FIELD
            || path == VERSION_KEY
            || (self.timestamps && (path == CREATED_AT || path == UPDATED_AT))
    }
}

/// [`Schema`] 빌더
pub struct SchemaBuilder {
    model_name: String,
    collection: Option<String>,
    fields: Vec<Field>,
    timestamps: bool,
}

impl SchemaBuilder {
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// `createdAt` / `updatedAt` 자동 관리
    pub fn timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    /// 기본 컬렉션 이름 대신 사용할 이름
    pub fn collection(mut self, name: &str) -> Self {
        self.collection = Some(name.to_string());
        self
    }

    /// 선언을 검증하고 [`Schema`]를 만듭니다.
    ///
    /// # Errors
    ///
    /// * 같은 경로가 두 번 선언된 경우
    /// * 관리 필드(`_id`, `__v`, 타임스탬프)를 직접 선언한 경우
    /// * 문자열이 아닌 필드에 `lowercase`를 지정한 경우
    /// * ObjectId가 아닌 필드에 `reference`를 지정한 경우
    pub fn build(self) -> AppResult<Schema> {
        if self.model_name.trim().is_empty() {
            return Err(AppError::InvalidSchema("모델 이름이 비어 있습니다".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            let reserved = field.name == ID_FIELD
                || field.name == VERSION_KEY
                || (self.timestamps && (field.name == CREATED_AT || field.name == UPDATED_AT));
            if reserved {
                return Err(AppError::InvalidSchema(format!(
                    "{}.{} 는 자동 관리되는 필드입니다",
                    self.model_name, field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(AppError::InvalidSchema(format!(
                    "{}.{} 가 중복 선언되었습니다",
                    self.model_name, field.name
                )));
            }
            if field.lowercase && field.field_type != FieldType::String {
                return Err(AppError::InvalidSchema(format!(
                    "{}.{}: lowercase는 String 필드에만 사용할 수 있습니다",
                    self.model_name, field.name
                )));
            }
            if field.reference.is_some() && field.field_type != FieldType::ObjectId {
                return Err(AppError::InvalidSchema(format!(
                    "{}.{}: reference는 ObjectId 필드에만 사용할 수 있습니다",
                    self.model_name, field.name
                )));
            }
        }

        let collection = self
            .collection
            .unwrap_or_else(|| default_collection_name(&self.model_name));

        Ok(Schema {
            model_name: self.model_name,
            collection,
            fields: self.fields,
            timestamps: self.timestamps,
        })
    }
}

/// 모델 이름에서 기본 컬렉션 이름을 만듭니다.
///
/// 소문자로 바꾼 뒤 영어 복수형 규칙을 적용합니다.
/// `Product → products`, `Category → categories`, `Box → boxes`
pub fn default_collection_name(model_name: &str) -> String {
    let lower = model_name.to_lowercase();

    if lower.ends_with('s') {
        return lower;
    }
    if let Some(stem) = lower.strip_suffix('y') {
        let before = stem.chars().last();
        if !matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u') | None) {
            return format!("{}ies", stem);
        }
    }
    if lower.ends_with('x') || lower.ends_with("ch") || lower.ends_with("sh") || lower.ends_with('z') {
        return format!("{}es", lower);
    }
    format!("{}s", lower)
}
