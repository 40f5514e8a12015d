//! 데이터 모델 부트스트랩
//!
//! MongoDB에 연결하고 상품/사용자 모델을 등록한 뒤,
//! `AUTO_INDEX`가 켜져 있으면 등록과 함께 유니크 인덱스를 생성하고 종료합니다.

use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use data_modelling::config::{DatabaseConfig, Environment};
use data_modelling::core::ModelRegistry;
use data_modelling::db::{Database, MongoStore};
use data_modelling::domain::{Product, User};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    init_logging();

    info!("🚀 데이터 모델 초기화 시작 ({:?})", Environment::current());

    let config = DatabaseConfig::from_env()?;

    info!("📡 데이터베이스 연결 중...");
    let database = Arc::new(Database::connect(&config).await?);
    info!("✅ MongoDB 연결 성공: {}", database.database_name());

    if !config.auto_index {
        warn!("AUTO_INDEX 비활성화: 유니크 제약은 이미 만들어진 인덱스에 의존합니다");
    }

    let registry = ModelRegistry::new(Arc::new(MongoStore::new(database)))
        .with_auto_index(config.auto_index);
    registry.register::<Product>().await?;
    registry.register::<User>().await?;

    info!("✅ 등록된 모델: {}", registry.model_names().join(", "));
    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG`가 없으면 info 레벨로 시작합니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}
