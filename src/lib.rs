//! Lacquer Server - 油漆商店后端服务
//!
//! # 架构概述
//!
//! - **订单引擎** (`orders`): 订单生命周期与一致性规则
//! - **商品目录** (`catalog` + `db`): 商品快照来源
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── auth/          # JWT 认证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── catalog/       # 商品快照接口
//! ├── orders/        # 订单引擎
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 错误、日志、分页
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{Order, OrderService, OrderStatus};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __
   / /   ____ __________ ___  _____  _____
  / /   / __ `/ ___/ __ `/ / / / _ \/ ___/
 / /___/ /_/ / /__/ /_/ / /_/ /  __/ /
/_____/\__,_/\___/\__, /\__,_/\___/_/
                    /_/
    "#
    );
}
