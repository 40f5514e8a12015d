//! 필드 캐스팅과 필드 수준 검증
//!
//! 평범한 필드-값 매핑(BSON 문서)을 스키마에 맞춰 변환합니다.
//!
//! ## 규칙
//!
//! - 스키마에 없는 키는 버립니다 (strict 모드).
//! - 값은 선언된 타입으로 변환되며, 변환할 수 없으면 `TypeMismatch`입니다.
//! - `lowercase` 필드는 변환 후 소문자로 정규화됩니다.
//! - 값이 없거나 null이면 기본값이 적용됩니다.
//! - 필수 필드가 비어 있으면(null, 빈 문자열) `MissingRequiredField`입니다.

use log::debug;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};

use crate::domain::schema::field::{Field, FieldType};
use crate::domain::schema::schema::Schema;
use crate::errors::{AppError, AppResult};

impl Schema {
    /// 새 문서 생성을 위해 입력 전체를 캐스팅하고 검증합니다.
    ///
    /// 반환되는 문서는 스키마 선언 순서를 따르며, 값이 없는 선택 필드는 포함하지 않습니다.
    /// `_id`, 타임스탬프, 버전 키는 모델 계층이 채웁니다.
    pub fn cast_new(&self, input: &Document) -> AppResult<Document> {
        self.log_dropped_paths(input);

        let mut output = Document::new();
        for field in self.fields() {
            let mut value = match input.get(field.name()) {
                Some(raw) => self.cast_field(field, raw)?,
                None => Bson::Null,
            };

            if value == Bson::Null {
                if let Some(default) = field.default() {
                    value = self.cast_field(field, default)?;
                }
            }

            if field.is_required() && is_blank(&value) {
                return Err(self.missing(field));
            }

            if value != Bson::Null {
                output.insert(field.name(), value);
            }
        }

        Ok(output)
    }

    /// 부분 수정을 위해 입력에 포함된 경로만 캐스팅하고 검증합니다.
    ///
    /// 관리 필드와 스키마에 없는 키는 무시됩니다.
    pub fn cast_update(&self, input: &Document) -> AppResult<Document> {
        let mut output = Document::new();

        for (path, raw) in input {
            if self.is_managed_path(path) {
                debug!("{}: 관리 필드 {} 수정 요청 무시", self.model_name(), path);
                continue;
            }
            let Some(field) = self.field(path) else {
                debug!("{}: 스키마에 없는 경로 {} 무시", self.model_name(), path);
                continue;
            };

            let mut value = self.cast_field(field, raw)?;
            if value == Bson::Null {
                if let Some(default) = field.default() {
                    value = self.cast_field(field, default)?;
                }
            }

            if field.is_required() && is_blank(&value) {
                return Err(self.missing(field));
            }

            output.insert(path.clone(), value);
        }

        Ok(output)
    }

    fn cast_field(&self, field: &Field, raw: &Bson) -> AppResult<Bson> {
        let cast = cast_value(field.field_type(), raw).ok_or_else(|| AppError::TypeMismatch {
            model: self.model_name().to_string(),
            field: field.name().to_string(),
            expected: field.field_type().to_string(),
            actual: bson_type_name(raw),
        })?;

        match cast {
            Bson::String(s) if field.is_lowercase() => Ok(Bson::String(s.to_lowercase())),
            other => Ok(other),
        }
    }

    fn missing(&self, field: &Field) -> AppError {
        AppError::MissingRequiredField {
            model: self.model_name().to_string(),
            field: field.name().to_string(),
        }
    }

    fn log_dropped_paths(&self, input: &Document) {
        for path in input.keys() {
            if self.field(path).is_none() && !self.is_managed_path(path) {
                debug!("{}: 스키마에 없는 경로 {} 제거", self.model_name(), path);
            }
        }
    }
}

/// JSON 객체를 필드-값 매핑으로 변환합니다.
///
/// # Errors
///
/// * `ValidationError` - 입력이 JSON 객체가 아닌 경우
pub fn fields_from_json(value: serde_json::Value) -> AppResult<Document> {
    match bson::to_bson(&value)? {
        Bson::Document(doc) => Ok(doc),
        other => Err(AppError::ValidationError(format!(
            "필드 매핑은 객체여야 합니다 (받은 타입: {})",
            bson_type_name(&other)
        ))),
    }
}

/// double이 정확히 표현하는 가장 큰 정수 (2^53 - 1)
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// 값을 선언된 타입으로 변환합니다. 변환할 수 없으면 `None`.
///
/// null은 어떤 타입이든 null로 유지됩니다.
fn cast_value(field_type: FieldType, raw: &Bson) -> Option<Bson> {
    if matches!(raw, Bson::Null | Bson::Undefined) {
        return Some(Bson::Null);
    }

    match field_type {
        FieldType::String => match raw {
            Bson::String(s) => Some(Bson::String(s.clone())),
            Bson::Int32(n) => Some(Bson::String(n.to_string())),
            Bson::Int64(n) => Some(Bson::String(n.to_string())),
            Bson::Double(n) => Some(Bson::String(format_number(*n))),
            Bson::Boolean(b) => Some(Bson::String(b.to_string())),
            Bson::ObjectId(oid) => Some(Bson::String(oid.to_hex())),
            _ => None,
        },
        FieldType::Number => {
            let number = match raw {
                Bson::Int32(n) => f64::from(*n),
                // 2^53을 넘는 정수는 double로 정확히 표현할 수 없으므로 거부합니다.
                Bson::Int64(n) if n.unsigned_abs() <= MAX_SAFE_INTEGER => *n as f64,
                Bson::Int64(_) => return None,
                Bson::Double(n) => *n,
                Bson::Decimal128(d) => d.to_string().parse::<f64>().ok()?,
                Bson::Boolean(b) => {
                    if *b {
                        1.0
                    } else {
                        0.0
                    }
                }
                Bson::String(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        return Some(Bson::Null);
                    }
                    trimmed.parse::<f64>().ok()?
                }
                _ => return None,
            };
            number.is_finite().then_some(Bson::Double(number))
        }
        FieldType::ObjectId => match raw {
            Bson::ObjectId(oid) => Some(Bson::ObjectId(*oid)),
            Bson::String(s) => ObjectId::parse_str(s).ok().map(Bson::ObjectId),
            Bson::Document(doc) => doc.get_object_id("_id").ok().map(Bson::ObjectId),
            _ => None,
        },
    }
}

/// 정수 값은 소수점 없이, 나머지는 기본 표기로 문자열화합니다.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn is_blank(value: &Bson) -> bool {
    match value {
        Bson::Null => true,
        Bson::String(s) => s.is_empty(),
        _ => false,
    }
}

fn bson_type_name(value: &Bson) -> String {
    format!("{:?}", value.element_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, Decimal128};
    use serde_json::json;

    fn account_schema() -> Schema {
        Schema::builder("Account")
            .field(Field::string("handle").required().unique().lowercase())
            .field(Field::number("balance").default_value(0.0))
            .field(Field::string("note"))
            .field(Field::object_id("owner").reference("User"))
            .timestamps()
            .build()
            .unwrap()
    }

    #[test]
    fn test_cast_new_applies_lowercase_and_default() {
        let schema = account_schema();
        let cast = schema.cast_new(&doc! { "handle": "MiXeD" }).unwrap();

        assert_eq!(cast.get_str("handle").unwrap(), "mixed");
        assert_eq!(cast.get_f64("balance").unwrap(), 0.0);
        assert!(!cast.contains_key("note"));
        assert!(!cast.contains_key("owner"));
    }

    #[test]
    fn test_cast_new_drops_unknown_and_managed_paths() {
        let schema = account_schema();
        let input = doc! {
            "handle": "a",
            "nickname": "ignored",
            "_id": "not-an-id",
            "createdAt": "yesterday",
        };

        let cast = schema.cast_new(&input).unwrap();
        let keys: Vec<_> = cast.keys().cloned().collect();
        assert_eq!(keys, vec!["handle", "balance"]);
    }

    #[test]
    fn test_required_rejects_null_and_empty_string() {
        let schema = account_schema();

        for input in [doc! {}, doc! { "handle": Bson::Null }, doc! { "handle": "" }] {
            let result = schema.cast_new(&input);
            assert!(matches!(
                result,
                Err(AppError::MissingRequiredField { ref field, .. }) if field == "handle"
            ));
        }
    }

    #[test]
    fn test_number_casting() {
        assert_eq!(cast_value(FieldType::Number, &Bson::String(" 10 ".into())), Some(Bson::Double(10.0)));
        assert_eq!(cast_value(FieldType::Number, &Bson::Int32(3)), Some(Bson::Double(3.0)));
        assert_eq!(cast_value(FieldType::Number, &Bson::Boolean(true)), Some(Bson::Double(1.0)));
        assert_eq!(cast_value(FieldType::Number, &Bson::String("".into())), Some(Bson::Null));
        assert_eq!(cast_value(FieldType::Number, &Bson::String("ten".into())), None);
        assert_eq!(cast_value(FieldType::Number, &Bson::String("inf".into())), None);
        assert_eq!(cast_value(FieldType::Number, &Bson::Array(vec![])), None);
    }

    #[test]
    fn test_int64_outside_exact_range_is_rejected() {
        let largest = (1_i64 << 53) - 1;

        assert_eq!(cast_value(FieldType::Number, &Bson::Int64(largest)), Some(Bson::Double(largest as f64)));
        assert_eq!(cast_value(FieldType::Number, &Bson::Int64(-largest)), Some(Bson::Double(-largest as f64)));
        assert_eq!(cast_value(FieldType::Number, &Bson::Int64(largest + 2)), None);
        assert_eq!(cast_value(FieldType::Number, &Bson::Int64(i64::MIN)), None);
    }

    #[test]
    fn test_decimal128_casts_to_number() {
        // 계수 125, 지수 -1 → 12.5
        let bits: u128 = (0x303E_0000_0000_0000_u128 << 64) | 125;
        let decimal = Decimal128::from_bytes(bits.to_le_bytes());

        assert_eq!(cast_value(FieldType::Number, &Bson::Decimal128(decimal)), Some(Bson::Double(12.5)));
    }

    #[test]
    fn test_out_of_range_price_is_type_mismatch() {
        let schema = Schema::builder("Item")
            .field(Field::number("price").required())
            .build()
            .unwrap();

        let result = schema.cast_new(&doc! { "price": i64::MAX });
        assert!(matches!(
            result,
            Err(AppError::TypeMismatch { ref field, ref actual, .. }) if field == "price" && actual == "Int64"
        ));
    }

    #[test]
    fn test_string_casting() {
        assert_eq!(cast_value(FieldType::String, &Bson::Double(10.0)), Some(Bson::String("10".into())));
        assert_eq!(cast_value(FieldType::String, &Bson::Double(2.5)), Some(Bson::String("2.5".into())));
        assert_eq!(cast_value(FieldType::String, &Bson::Boolean(false)), Some(Bson::String("false".into())));
        assert_eq!(cast_value(FieldType::String, &Bson::Document(doc! {})), None);
    }

    #[test]
    fn test_object_id_casting() {
        let oid = ObjectId::new();

        assert_eq!(cast_value(FieldType::ObjectId, &Bson::String(oid.to_hex())), Some(Bson::ObjectId(oid)));
        assert_eq!(cast_value(FieldType::ObjectId, &Bson::Document(doc! { "_id": oid })), Some(Bson::ObjectId(oid)));
        assert_eq!(cast_value(FieldType::ObjectId, &Bson::String("1234".into())), None);
    }

    #[test]
    fn test_type_mismatch_reports_field() {
        let schema = account_schema();
        let result = schema.cast_new(&doc! { "handle": "a", "owner": "bogus" });

        match result {
            Err(AppError::TypeMismatch { model, field, expected, actual }) => {
                assert_eq!(model, "Account");
                assert_eq!(field, "owner");
                assert_eq!(expected, "ObjectId");
                assert_eq!(actual, "String");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_cast_update_keeps_only_present_paths() {
        let schema = account_schema();
        let cast = schema
            .cast_update(&doc! { "handle": "NEW", "updatedAt": 0, "unknown": 1 })
            .unwrap();

        assert_eq!(cast, doc! { "handle": "new" });
    }

    #[test]
    fn test_cast_update_rejects_clearing_required_field() {
        let schema = account_schema();
        let result = schema.cast_update(&doc! { "handle": "" });

        assert!(matches!(result, Err(AppError::MissingRequiredField { .. })));
    }

    #[test]
    fn test_cast_update_null_restores_default() {
        let schema = account_schema();
        let cast = schema.cast_update(&doc! { "balance": Bson::Null }).unwrap();

        assert_eq!(cast, doc! { "balance": 0.0 });
    }

    #[test]
    fn test_fields_from_json() {
        let fields = fields_from_json(json!({ "name": "Pen", "price": 10 })).unwrap();
        assert_eq!(fields.get_str("name").unwrap(), "Pen");

        let result = fields_from_json(json!(["not", "an", "object"]));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
