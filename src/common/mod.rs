//! 公共工具模块

pub mod auth;
pub mod types;
