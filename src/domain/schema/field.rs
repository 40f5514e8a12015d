//! 스키마 필드 선언
//!
//! 필드 이름, 타입, 제약 조건(required / unique / lowercase), 기본값,
//! 참조 대상 모델을 하나의 [`Field`] 값으로 표현합니다.

use std::fmt;

use mongodb::bson::Bson;

/// 스키마 필드가 저장하는 값의 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 문자열
    String,
    /// 숫자 (BSON double로 저장)
    Number,
    /// 다른 문서를 가리키는 ObjectId
    ObjectId,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::ObjectId => "ObjectId",
        };
        f.write_str(name)
    }
}

/// 단일 필드 선언
///
/// 빌더 형태로 제약을 덧붙입니다.
///
/// ```rust,ignore
/// let username = Field::string("username").required().unique().lowercase();
/// let stock = Field::number("stock").default_value(0.0);
/// let owner = Field::object_id("owner").reference("User");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) required: bool,
    pub(crate) unique: bool,
    pub(crate) lowercase: bool,
    pub(crate) default: Option<Bson>,
    pub(crate) reference: Option<String>,
}

impl Field {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
            unique: false,
            lowercase: false,
            default: None,
            reference: None,
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn object_id(name: &str) -> Self {
        Self::new(name, FieldType::ObjectId)
    }

    /// 생성 시 값이 반드시 있어야 합니다. 문자열 필드는 빈 문자열도 거부됩니다.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 컬렉션 전체에서 값이 유일해야 합니다. 저장소의 유니크 인덱스로 강제됩니다.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// 저장 전에 소문자로 정규화합니다. 문자열 필드에만 허용됩니다.
    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    /// 값이 없거나 null일 때 적용할 기본값
    pub fn default_value(mut self, value: impl Into<Bson>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// 참조 대상 모델 이름 (약한 참조)
    pub fn reference(mut self, model_name: &str) -> Self {
        self.reference = Some(model_name.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_lowercase(&self) -> bool {
        self.lowercase
    }

    pub fn default(&self) -> Option<&Bson> {
        self.default.as_ref()
    }

    pub fn reference_target(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}
