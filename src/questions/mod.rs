//! 判断题模块
//!
//! 提供题目的持久化、分页查询和投票计数

mod error;
mod handlers;
pub mod model;
mod router;
mod service;
mod store;
mod types;

pub use router::create_questions_router;
pub use service::QuestionService;
