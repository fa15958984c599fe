//! 题目 SQLite 存储（同步）

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, types::Type};

use super::model::{NewQuestion, Question, QuestionUpdate, Vote};

const SELECT_COLUMNS: &str = "SELECT id, intitule, is_vraie, explication, nb_vote_vrai, nb_vote_faux, created_at, updated_at FROM questions";

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        intitule: row.get(1)?,
        is_vraie: row.get(2)?,
        explication: row.get(3)?,
        nb_vote_vrai: row.get::<_, i64>(4)? as u64,
        nb_vote_faux: row.get::<_, i64>(5)? as u64,
        created_at: parse_timestamp(row, 6)?,
        updated_at: parse_timestamp(row, 7)?,
    })
}

fn select_one(conn: &Connection, id: i64) -> rusqlite::Result<Option<Question>> {
    conn.query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), [id], map_row)
        .optional()
}

/// 单连接 SQLite 存储
pub struct QuestionStore {
    conn: Mutex<Connection>,
}

impl QuestionStore {
    pub fn open(db_path: &str) -> Result<Self> {
        Self::init(Connection::open(db_path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                intitule TEXT NOT NULL,
                is_vraie INTEGER NOT NULL DEFAULT 0,
                explication TEXT NOT NULL,
                nb_vote_vrai INTEGER NOT NULL DEFAULT 0,
                nb_vote_faux INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn find_all(&self) -> Result<Vec<Question>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
        let questions = stmt
            .query_map([], map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(questions)
    }

    /// 按 id 升序分页
    pub fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Question>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY id ASC LIMIT ?1 OFFSET ?2",
            SELECT_COLUMNS
        ))?;
        let questions = stmt
            .query_map([limit, offset], map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(questions)
    }

    pub fn find_one(&self, id: i64) -> Result<Option<Question>> {
        let conn = self.conn.lock();
        Ok(select_one(&conn, id)?)
    }

    pub fn create(&self, data: &NewQuestion) -> Result<Question> {
        let conn = self.conn.lock();
        let now = now_timestamp();
        conn.execute(
            "INSERT INTO questions (intitule, is_vraie, explication, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            rusqlite::params![data.intitule, data.is_vraie, data.explication, now],
        )?;
        let id = conn.last_insert_rowid();
        select_one(&conn, id)?
            .ok_or_else(|| anyhow::anyhow!("新插入的题目 #{} 读取失败", id))
    }

    /// 更新提供的字段并返回更新后的记录，id 不存在时返回 `None`
    pub fn update(&self, id: i64, data: &QuestionUpdate) -> Result<Option<Question>> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE questions SET
                intitule = COALESCE(?1, intitule),
                is_vraie = COALESCE(?2, is_vraie),
                explication = COALESCE(?3, explication),
                updated_at = ?4
             WHERE id = ?5",
            rusqlite::params![
                data.intitule,
                data.is_vraie,
                data.explication,
                now_timestamp(),
                id
            ],
        )?;
        Ok(select_one(&conn, id)?)
    }

    /// 删除题目，返回是否确有记录被删除
    pub fn remove(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
        Ok(count > 0)
    }

    /// 对应计数加一，返回 id 是否存在
    ///
    /// 单条 UPDATE 完成自增，并发投票不会丢失
    pub fn increment_vote(&self, id: i64, vote: Vote) -> Result<bool> {
        let conn = self.conn.lock();
        let column = vote.column();
        let count = conn.execute(
            &format!(
                "UPDATE questions SET {column} = {column} + 1, updated_at = ?1 WHERE id = ?2"
            ),
            rusqlite::params![now_timestamp(), id],
        )?;
        Ok(count > 0)
    }
}
