use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::db;
use crate::parser::{self, JobRecord};

/// What happened to one extracted record during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    New,
    Duplicate,
    /// Insert failed at the storage layer; the record was dropped and the
    /// rest of the batch carried on.
    Failed,
}

pub struct IngestSummary {
    pub found: usize,
    pub new: usize,
    pub duplicates: usize,
    pub records: Vec<(JobRecord, Outcome)>,
}

/// Extract every block from a dump and ingest the records in block order
/// inside one transaction.
///
/// The hash lookup here is a fast-path optimization; the UNIQUE constraint on
/// job_hash is the authoritative dedup guard, so an insert that loses a race
/// is caught and counted as a failure, not propagated. Failing to open or
/// commit the transaction aborts the whole call.
pub fn ingest(conn: &Connection, raw: &str) -> Result<IngestSummary> {
    ingest_records(conn, parser::extract(raw))
}

pub fn ingest_records(conn: &Connection, records: Vec<JobRecord>) -> Result<IngestSummary> {
    let tx = conn.unchecked_transaction()?;

    let mut summary = IngestSummary {
        found: records.len(),
        new: 0,
        duplicates: 0,
        records: Vec::with_capacity(records.len()),
    };

    for record in records {
        let outcome = if db::exists_by_hash(&tx, &record.job_hash)? {
            debug!(
                "duplicate job {} (block {})",
                &record.job_hash[..8],
                record.sequence_number
            );
            summary.duplicates += 1;
            Outcome::Duplicate
        } else {
            match db::insert_job(&tx, &record) {
                Ok(id) => {
                    debug!("saved job {} as id {}", &record.job_hash[..8], id);
                    summary.new += 1;
                    Outcome::New
                }
                Err(e) => {
                    warn!("insert failed for block {}: {}", record.sequence_number, e);
                    Outcome::Failed
                }
            }
        };
        summary.records.push((record, outcome));
    }

    tx.commit()?;
    Ok(summary)
}
