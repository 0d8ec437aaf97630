//! 商品 CRUD 服务
//!
//! 请求链路: HTTP 路由 -> 校验 -> [`domain::services::ProductService`] -> [`infrastructure::repository::ProductRepository`]。

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod utils;
