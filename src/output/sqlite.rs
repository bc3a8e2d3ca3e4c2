//! SQLite record sink

use crate::output::traits::{RecordSink, SinkError};
use crate::record::JobRecord;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// Record sink backed by a SQLite database
///
/// The connection is guarded by a mutex so concurrent appends from the
/// detail pipeline serialize into well-formed rows.
pub struct SqliteSink {
    conn: Mutex<Connection>,
}

impl SqliteSink {
    /// Opens (or creates) the database and ensures the jobs table exists
    ///
    /// Initialization is idempotent; reopening an existing database leaves
    /// previously appended rows untouched.
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                domain TEXT NOT NULL,
                post_url TEXT NOT NULL,
                job_id TEXT NOT NULL,
                title TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                speciality TEXT NOT NULL,
                job_type TEXT NOT NULL,
                job_details TEXT NOT NULL,
                industry TEXT NOT NULL,
                company TEXT NOT NULL,
                posted_on TEXT NOT NULL,
                salary_from TEXT NOT NULL,
                salary_upto TEXT NOT NULL,
                payout_term TEXT NOT NULL,
                is_estimated_salary INTEGER NOT NULL,
                scraped_on TEXT NOT NULL
            );
        ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory sink (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, SinkError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                domain TEXT NOT NULL, post_url TEXT NOT NULL, job_id TEXT NOT NULL,
                title TEXT NOT NULL, city TEXT NOT NULL, state TEXT NOT NULL,
                speciality TEXT NOT NULL, job_type TEXT NOT NULL, job_details TEXT NOT NULL,
                industry TEXT NOT NULL, company TEXT NOT NULL, posted_on TEXT NOT NULL,
                salary_from TEXT NOT NULL, salary_upto TEXT NOT NULL, payout_term TEXT NOT NULL,
                is_estimated_salary INTEGER NOT NULL, scraped_on TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl RecordSink for SqliteSink {
    fn append(&self, record: &JobRecord) -> Result<(), SinkError> {
        let conn = self.conn.lock().map_err(|_| SinkError::Poisoned)?;

        conn.execute(
            "INSERT INTO jobs (
                domain, post_url, job_id, title, city, state, speciality,
                job_type, job_details, industry, company, posted_on,
                salary_from, salary_upto, payout_term, is_estimated_salary,
                scraped_on
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                record.domain,
                record.post_url,
                record.job_id,
                record.title,
                record.city,
                record.state,
                record.speciality,
                record.job_type,
                record.job_details,
                record.industry,
                record.company,
                record.posted_on,
                record.salary_from,
                record.salary_upto,
                record.payout_term,
                record.is_estimated_salary,
                record.scraped_on,
            ],
        )?;

        Ok(())
    }
}
