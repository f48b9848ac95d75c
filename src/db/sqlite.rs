use crate::config::Config;
use crate::db::models::DbQuestion;
use crate::db::schema::SQLITE_INIT;
use crate::error::PollError;
use crate::service::repository::QuestionRepository;
use crate::service::validation::{NewQuestion, QuestionId, VoteOption, same_option};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

macro_rules! question_columns {
    () => {
        "id, option_a, option_b, option_a_votes, option_b_votes, is_flagged, created_at"
    };
}

const PICK_RANDOM: &str = concat!(
    "SELECT ",
    question_columns!(),
    " FROM questions WHERE is_flagged = 0 ORDER BY RANDOM() LIMIT 1"
);

// The counter column is picked from a closed set of statements; nothing user-supplied is
// spliced into SQL.
const VOTE_A: &str = concat!(
    "UPDATE questions SET option_a_votes = option_a_votes + 1 ",
    "WHERE id = ? AND is_flagged = 0 RETURNING ",
    question_columns!()
);

const VOTE_B: &str = concat!(
    "UPDATE questions SET option_b_votes = option_b_votes + 1 ",
    "WHERE id = ? AND is_flagged = 0 RETURNING ",
    question_columns!()
);

const INSERT: &str = concat!(
    "INSERT INTO questions (option_a, option_b, created_at) VALUES (?, ?, ?) RETURNING ",
    question_columns!()
);

const FLAG: &str = "UPDATE questions SET is_flagged = 1 WHERE id = ? AND is_flagged = 0 RETURNING id";

const GET_BY_ID: &str = concat!(
    "SELECT ",
    question_columns!(),
    " FROM questions WHERE id = ?"
);

/// Open a pool against `cfg.database_url`, creating the file if needed.
pub async fn connect(cfg: &Config) -> Result<SqlitePool, PollError> {
    let connect_opts = SqliteConnectOptions::from_str(cfg.database_url.as_str())?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(cfg.acquire_timeout());
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout())
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), PollError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Look up a row regardless of its flag. Not part of the public poll surface.
    pub async fn get_by_id(&self, id: QuestionId) -> Result<Option<DbQuestion>, PollError> {
        let row = sqlx::query_as::<_, DbQuestion>(GET_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl QuestionRepository for SqliteQuestionStore {
    async fn pick_random_unflagged(&self) -> Result<DbQuestion, PollError> {
        sqlx::query_as::<_, DbQuestion>(PICK_RANDOM)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PollError::NotFound)
    }

    async fn increment_vote(
        &self,
        id: QuestionId,
        option: VoteOption,
    ) -> Result<DbQuestion, PollError> {
        let sql = match option {
            VoteOption::A => VOTE_A,
            VoteOption::B => VOTE_B,
        };
        let row = sqlx::query_as::<_, DbQuestion>(sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        debug!(question_id = %id, option = %option, hit = row.is_some(), "vote increment");
        row.ok_or(PollError::NotFound)
    }

    async fn insert(&self, question: &NewQuestion) -> Result<DbQuestion, PollError> {
        if same_option(question.option_a(), question.option_b()) {
            return Err(PollError::DuplicateOptions);
        }
        let row = sqlx::query_as::<_, DbQuestion>(INSERT)
            .bind(question.option_a())
            .bind(question.option_b())
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn flag(&self, id: QuestionId) -> Result<QuestionId, PollError> {
        let flagged: Option<i64> = sqlx::query_scalar(FLAG)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        match flagged {
            Some(raw) => QuestionId::new(raw),
            None => Err(PollError::NotFound),
        }
    }

    async fn ping(&self) -> Result<(), PollError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
