//! 题目业务服务（异步）
//!
//! SQLite 访问全部放到阻塞线程池执行

use std::sync::Arc;

use super::error::QuestionError;
use super::model::{NewQuestion, Question, QuestionUpdate, Vote};
use super::store::QuestionStore;

/// 每页题目数
pub const PAGE_SIZE: i64 = 20;

pub struct QuestionService {
    store: Arc<QuestionStore>,
}

impl QuestionService {
    pub fn new(store: QuestionStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// 打开数据库（`:memory:` 为内存库）
    pub fn open(db_path: &str) -> anyhow::Result<Self> {
        Ok(Self::new(QuestionStore::open(db_path)?))
    }

    async fn run<T, F>(&self, f: F) -> Result<T, QuestionError>
    where
        T: Send + 'static,
        F: FnOnce(&QuestionStore) -> anyhow::Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(anyhow::Error::from)?;
        Ok(result?)
    }

    pub async fn find_all(&self) -> Result<Vec<Question>, QuestionError> {
        self.run(|store| store.find_all()).await
    }

    /// 不存在时返回 `None` 而非错误
    pub async fn find_one(&self, id: i64) -> Result<Option<Question>, QuestionError> {
        self.run(move |store| store.find_one(id)).await
    }

    pub async fn create(&self, data: NewQuestion) -> Result<Question, QuestionError> {
        require_text("intitule", Some(data.intitule.as_str()))?;
        require_text("explication", Some(data.explication.as_str()))?;
        self.run(move |store| store.create(&data)).await
    }

    pub async fn update(
        &self,
        id: i64,
        data: QuestionUpdate,
    ) -> Result<Option<Question>, QuestionError> {
        require_text("intitule", data.intitule.as_deref())?;
        require_text("explication", data.explication.as_deref())?;
        self.run(move |store| store.update(id, &data)).await
    }

    pub async fn remove(&self, id: i64) -> Result<(), QuestionError> {
        let removed = self.run(move |store| store.remove(id)).await?;
        if !removed {
            tracing::debug!("删除的题目 #{} 不存在", id);
        }
        Ok(())
    }

    /// 第 `page` 页（从 1 开始），每页 [`PAGE_SIZE`] 条
    pub async fn get_questions_by_page(&self, page: i64) -> Result<Vec<Question>, QuestionError> {
        if page < 1 {
            return Err(QuestionError::InvalidPage(page));
        }
        let offset = (page - 1).saturating_mul(PAGE_SIZE);
        self.run(move |store| store.find_page(offset, PAGE_SIZE)).await
    }

    pub async fn vote_vrai(&self, id: i64) -> Result<(), QuestionError> {
        self.vote(id, Vote::Vrai).await
    }

    pub async fn vote_faux(&self, id: i64) -> Result<(), QuestionError> {
        self.vote(id, Vote::Faux).await
    }

    async fn vote(&self, id: i64, vote: Vote) -> Result<(), QuestionError> {
        let found = self
            .run(move |store| store.increment_vote(id, vote))
            .await?;
        if found {
            Ok(())
        } else {
            Err(QuestionError::NotFound(id))
        }
    }
}

/// 必填文本字段不能为空白；`None` 表示未提供（仅更新时允许）
fn require_text(field: &str, value: Option<&str>) -> Result<(), QuestionError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(QuestionError::InvalidInput(format!(
            "{} must not be empty",
            field
        ))),
        _ => Ok(()),
    }
}
