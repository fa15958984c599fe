//! 题目 API 请求参数

use serde::Deserialize;

/// `GET /questions` 查询参数
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// 提供时按页返回，否则返回全部
    pub page: Option<i64>,
}
