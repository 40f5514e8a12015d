//! 데이터베이스 및 실행 환경 설정 관리 모듈
//!
//! 환경 변수에서 MongoDB 연결 설정을 읽고 `validator`로 검증합니다.

use std::env;

use validator::{Validate, ValidationError};

use crate::errors::{AppError, AppResult};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Development`를 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::detect(env::var("ENVIRONMENT").ok(), env::var("NODE_ENV").ok())
    }

    fn detect(environment: Option<String>, node_env: Option<String>) -> Self {
        environment
            .or(node_env)
            .map(|name| Self::from_name(&name))
            .unwrap_or(Environment::Development)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 모델 등록 시 유니크 인덱스를 자동으로 만들지 여부의 기본값
    ///
    /// 프로덕션으로 명시된 경우에만 꺼 둡니다. 이때 유니크 인덱스는 미리 만들어져 있어야 합니다.
    pub fn auto_index_default(&self) -> bool {
        !matches!(self, Environment::Production)
    }
}

/// MongoDB 연결 설정
///
/// ## 환경 변수
///
/// | 변수 | 기본값 |
/// |------|--------|
/// | `MONGODB_URI` | `mongodb://localhost:27017` |
/// | `DATABASE_NAME` | `data_modelling_dev` |
/// | `MONGODB_APP_NAME` | `data_modelling` |
/// | `AUTO_INDEX` | 프로덕션 `false`, 그 외 `true` |
#[derive(Debug, Clone, Validate)]
pub struct DatabaseConfig {
    /// MongoDB 연결 URI
    #[validate(custom(function = "validate_mongodb_uri"))]
    pub uri: String,

    /// 사용할 데이터베이스 이름
    #[validate(length(
        min = 1,
        max = 63,
        message = "데이터베이스 이름은 1-63자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_database_name"))]
    pub database_name: String,

    /// 드라이버에 전달할 애플리케이션 이름
    #[validate(length(min = 1, message = "애플리케이션 이름이 비어 있습니다"))]
    pub app_name: String,

    /// 모델 초기화 시 유니크 인덱스 생성 여부
    pub auto_index: bool,
}

impl DatabaseConfig {
    /// 기본값을 채운 설정을 만들고 검증합니다.
    pub fn new(uri: &str, database_name: &str) -> AppResult<Self> {
        Self {
            uri: uri.to_string(),
            database_name: database_name.to_string(),
            app_name: "data_modelling".to_string(),
            auto_index: Environment::current().auto_index_default(),
        }
        .validated()
    }

    /// 환경 변수에서 설정을 읽고 검증합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError` - URI 형식 오류, 빈 데이터베이스 이름 등
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::current();

        let auto_index = match env::var("AUTO_INDEX") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                AppError::ConfigError(format!("AUTO_INDEX 값을 해석할 수 없습니다: {}", value))
            })?,
            Err(_) => environment.auto_index_default(),
        };

        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "data_modelling_dev".to_string()),
            app_name: env::var("MONGODB_APP_NAME").unwrap_or_else(|_| "data_modelling".to_string()),
            auto_index,
        }
        .validated()
    }

    fn validated(self) -> AppResult<Self> {
        self.validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `mongodb://` 또는 `mongodb+srv://` 스킴만 허용
fn validate_mongodb_uri(uri: &str) -> Result<(), ValidationError> {
    let has_scheme = uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://");
    let has_host = uri
        .split_once("://")
        .map(|(_, rest)| !rest.trim().is_empty())
        .unwrap_or(false);

    if !(has_scheme && has_host) {
        return Err(ValidationError::new("invalid_mongodb_uri")
            .with_message("MongoDB URI는 mongodb:// 또는 mongodb+srv:// 로 시작해야 합니다".into()));
    }
    Ok(())
}

/// MongoDB가 허용하지 않는 문자 검사
fn validate_database_name(name: &str) -> Result<(), ValidationError> {
    const FORBIDDEN: [char; 8] = ['/', '\\', '.', ' ', '"', '$', '*', ':'];

    if name.chars().any(|c| FORBIDDEN.contains(&c)) {
        return Err(ValidationError::new("invalid_database_name")
            .with_message("데이터베이스 이름에 사용할 수 없는 문자가 있습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("TEST"), Environment::Test);
        assert_eq!(Environment::from_name("stage"), Environment::Staging);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
    }

    #[test]
    fn test_unset_environment_is_development() {
        let environment = Environment::detect(None, None);

        assert_eq!(environment, Environment::Development);
        assert!(environment.auto_index_default());
    }

    #[test]
    fn test_environment_prefers_explicit_variable() {
        let environment = Environment::detect(Some("staging".to_string()), Some("production".to_string()));
        assert_eq!(environment, Environment::Staging);

        let environment = Environment::detect(None, Some("production".to_string()));
        assert_eq!(environment, Environment::Production);
    }

    #[test]
    fn test_auto_index_default_per_environment() {
        assert!(Environment::Development.auto_index_default());
        assert!(Environment::Test.auto_index_default());
        assert!(!Environment::Production.auto_index_default());
    }

    #[test]
    fn test_valid_config() {
        let config = DatabaseConfig::new("mongodb+srv://cluster0.example.net", "shop").unwrap();

        assert_eq!(config.database_name, "shop");
        assert_eq!(config.app_name, "data_modelling");
    }

    #[test]
    fn test_invalid_uri_is_config_error() {
        let result = DatabaseConfig::new("postgres://localhost", "shop");
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        let result = DatabaseConfig::new("mongodb://", "shop");
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_database_name_is_config_error() {
        assert!(matches!(
            DatabaseConfig::new("mongodb://localhost:27017", ""),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            DatabaseConfig::new("mongodb://localhost:27017", "my.db"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
