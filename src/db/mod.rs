//! Database Connection Management Module
//!
//! MongoDB 연결 관리와 문서 저장소 구현을 담당하는 모듈입니다.
//!
//! # 구성
//!
//! - [`Database`] - MongoDB 클라이언트와 데이터베이스 이름을 묶은 연결 래퍼
//! - [`store`] - 모델 계층이 사용하는 [`DocumentStore`] trait
//! - [`mongo_store`] - MongoDB 구현체
//! - [`memory_store`] - 프로세스 내 구현체
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::config::DatabaseConfig;
//! use crate::db::{Database, MongoStore};
//!
//! let config = DatabaseConfig::from_env()?;
//! let database = Arc::new(Database::connect(&config).await?);
//! let store = Arc::new(MongoStore::new(database));
//! ```

use log::info;
use mongodb::{options::ClientOptions, Client};

use crate::config::DatabaseConfig;
use crate::errors::{AppResult, ErrorContext};

pub mod memory_store;
pub mod mongo_store;
pub mod store;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;
pub use store::DocumentStore;

/// MongoDB 데이터베이스 연결 래퍼
///
/// MongoDB 클라이언트와 데이터베이스 연결을 관리하며,
/// [`MongoStore`]가 컬렉션에 접근할 때 사용합니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성합니다.
    ///
    /// 설정의 URI로 클라이언트를 초기화하고 `ping` 명령으로 연결 상태를 검증합니다.
    ///
    /// ## 사용 예제
    /// ```rust,ignore
    /// let database = Database::connect(&DatabaseConfig::from_env()?).await?;
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        // MongoDB 클라이언트 옵션 파싱
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        // 애플리케이션 이름 설정 (모니터링 및 로깅에 유용)
        client_options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(client_options)
            .with_context(|| format!("MongoDB 클라이언트 생성 실패 ({})", config.app_name))?;

        // 연결 테스트
        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 데이터베이스 이름을 반환합니다.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
