use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Clone 实现浅拷贝（连接池内部是 Arc），所有权成本极低。
/// 仓储与服务不持有全局单例，统一从这里取连接池。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SQLite)
    pub db: DbService,
}

impl ServerState {
    /// 初始化状态：打开数据库并应用迁移
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            db,
        })
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
