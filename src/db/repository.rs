//! Database repository for CRUD operations.
//!
//! Uses prepared statements for data integrity. The answered state of a
//! question is derived from the presence of an answer row, never stored
//! separately, so the two cannot drift apart.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Answer, Question, Report, UserProfile, UserRole};

const QUESTION_COLUMNS: &str =
    "id, text, is_anonymous, author, created_at, answer_text, answer_author, answered_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== QUESTION OPERATIONS ====================

    /// List all questions, newest first.
    pub async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM questions ORDER BY created_at DESC, id DESC",
            QUESTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    /// List questions without an answer, newest first.
    pub async fn list_unanswered_questions(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM questions WHERE answer_text IS NULL ORDER BY created_at DESC, id DESC",
            QUESTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    /// List questions asked by a user, newest first. Includes the user's
    /// anonymous questions; the author is still redacted in the result.
    pub async fn list_questions_by_user(&self, user_id: &str) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM questions WHERE author = ? ORDER BY created_at DESC, id DESC",
            QUESTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    /// Get a question by ID.
    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM questions WHERE id = ?",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(question_from_row))
    }

    /// Create a new question. `text` must already be validated and trimmed.
    pub async fn ask_question(
        &self,
        author: &str,
        text: &str,
        is_anonymous: bool,
    ) -> Result<Question, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO questions (text, is_anonymous, author, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(text)
        .bind(is_anonymous as i32)
        .bind(author)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Question {
            id: result.last_insert_rowid(),
            text: text.to_string(),
            is_anonymous,
            author: if is_anonymous {
                None
            } else {
                Some(author.to_string())
            },
            timestamp: now,
            is_answered: false,
            answer: None,
        })
    }

    /// Attach an answer to a question. `text` must already be validated and
    /// trimmed. Fails with Conflict if the question already has an answer.
    pub async fn answer_question(
        &self,
        id: i64,
        author: &str,
        text: &str,
    ) -> Result<Answer, AppError> {
        let existing = self
            .get_question(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))?;

        if existing.is_answered {
            return Err(AppError::Conflict(format!(
                "Question {} has already been answered",
                id
            )));
        }

        let now = Utc::now().to_rfc3339();

        // Conditional UPDATE so a concurrent answer loses rather than overwrites
        let result = sqlx::query(
            "UPDATE questions SET answer_text = ?, answer_author = ?, answered_at = ? WHERE id = ? AND answer_text IS NULL"
        )
        .bind(text)
        .bind(author)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Zero rows means the question was answered or deleted between
            // the read and the write; re-fetch to report which
            return match self.get_question(id).await? {
                Some(_) => Err(AppError::Conflict(format!(
                    "Question {} has already been answered",
                    id
                ))),
                None => Err(AppError::NotFound(format!("Question {} not found", id))),
            };
        }

        Ok(Answer {
            text: text.to_string(),
            author: author.to_string(),
            timestamp: now,
        })
    }

    /// Delete a question and any reports filed against it, atomically.
    pub async fn delete_question(&self, id: i64) -> Result<(), AppError> {
        // One transaction so the reports cannot outlive the question
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reports WHERE question_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Question {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    // ==================== REPORT OPERATIONS ====================

    /// File a report against a question.
    pub async fn report_question(
        &self,
        question_id: i64,
        reporter: &str,
        reason: Option<&str>,
    ) -> Result<Report, AppError> {
        self.get_question(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", question_id)))?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO reports (id, question_id, reporter, reason, created_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(question_id)
        .bind(reporter)
        .bind(reason)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Report {
            id,
            question_id,
            reporter: reporter.to_string(),
            reason: reason.map(|r| r.to_string()),
            created_at: now,
        })
    }

    /// List all reports, newest first.
    pub async fn list_reports(&self) -> Result<Vec<Report>, AppError> {
        let rows = sqlx::query(
            "SELECT id, question_id, reporter, reason, created_at FROM reports ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Report {
                id: row.get("id"),
                question_id: row.get("question_id"),
                reporter: row.get("reporter"),
                reason: row.get("reason"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    // ==================== PROFILE OPERATIONS ====================

    /// Get a user's profile by principal.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query("SELECT display_name, name FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| UserProfile {
            display_name: row.get("display_name"),
            name: row.get("name"),
        }))
    }

    /// Create or replace a user's profile.
    pub async fn save_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO profiles (user_id, display_name, name, updated_at) VALUES (?, ?, ?, ?)
               ON CONFLICT(user_id) DO UPDATE SET display_name = excluded.display_name,
                                                  name = excluded.name,
                                                  updated_at = excluded.updated_at"#,
        )
        .bind(user_id)
        .bind(&profile.display_name)
        .bind(&profile.name)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== ROLE OPERATIONS ====================

    /// Get a user's role. Authenticated principals without a stored role
    /// default to `user`.
    pub async fn get_role(&self, user_id: &str) -> Result<UserRole, AppError> {
        let row = sqlx::query("SELECT role FROM user_roles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .and_then(|row| {
                let role: String = row.get("role");
                UserRole::from_str(&role)
            })
            .unwrap_or(UserRole::User))
    }

    /// Assign a role to a user.
    pub async fn assign_role(&self, user_id: &str, role: UserRole) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO user_roles (user_id, role) VALUES (?, ?)
               ON CONFLICT(user_id) DO UPDATE SET role = excluded.role"#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Whether the user carries the admin role.
    pub async fn is_admin(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.get_role(user_id).await? == UserRole::Admin)
    }
}

// Helper functions for row conversion

fn question_from_row(row: &sqlx::sqlite::SqliteRow) -> Question {
    let is_anonymous: i32 = row.get("is_anonymous");
    let is_anonymous = is_anonymous != 0;
    let author: Option<String> = row.get("author");
    let answer_text: Option<String> = row.get("answer_text");

    let answer = answer_text.map(|text| Answer {
        text,
        author: row.get("answer_author"),
        timestamp: row.get("answered_at"),
    });

    Question {
        id: row.get("id"),
        text: row.get("text"),
        is_anonymous,
        // Anonymous questions never expose their author
        author: if is_anonymous { None } else { author },
        timestamp: row.get("created_at"),
        is_answered: answer.is_some(),
        answer,
    }
}
