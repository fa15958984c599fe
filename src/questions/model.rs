//! 题目数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 判断题记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    /// 题干
    pub intitule: String,
    /// 正确答案是否为"真"
    pub is_vraie: bool,
    /// 答案解析
    pub explication: String,
    /// 投"真"的次数
    pub nb_vote_vrai: u64,
    /// 投"假"的次数
    pub nb_vote_faux: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建题目请求
///
/// 投票计数不可由客户端指定，始终从 0 开始
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub intitule: String,
    #[serde(default)]
    pub is_vraie: bool,
    pub explication: String,
}

/// 更新题目请求（仅更新提供的字段）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdate {
    pub intitule: Option<String>,
    pub is_vraie: Option<bool>,
    pub explication: Option<String>,
}

/// 投票类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Vrai,
    Faux,
}

impl Vote {
    /// 对应的计数列
    pub(crate) fn column(self) -> &'static str {
        match self {
            Vote::Vrai => "nb_vote_vrai",
            Vote::Faux => "nb_vote_faux",
        }
    }
}
