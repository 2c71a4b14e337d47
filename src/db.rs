use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension};

use crate::parser::JobRecord;

const DB_PATH: &str = "data/ripjobs.sqlite";
const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn connect() -> Result<Connection> {
    if let Some(dir) = std::path::Path::new(DB_PATH).parent() {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS rip_jobs (
            id                    INTEGER PRIMARY KEY,
            job_hash              TEXT UNIQUE NOT NULL,
            table_html            TEXT NOT NULL,
            table_html_length     INTEGER NOT NULL,
            table_number          INTEGER NOT NULL,
            file_path             TEXT,
            file_size             TEXT,
            file_type             TEXT,
            printer_name          TEXT,
            port                  TEXT,
            sender                TEXT,
            job_type              TEXT,
            after_output          TEXT,
            dimensions            TEXT,
            resolution            TEXT,
            gray_icc_profile      TEXT,
            rgb_icc_profile       TEXT,
            cmyk_icc_profile      TEXT,
            output_icc_profile    TEXT,
            color_mode            TEXT,
            dither_type           TEXT,
            rendering_mode        TEXT,
            number_of_copies      INTEGER,
            number_of_pages       INTEGER,
            rip_start_datetime    TEXT,
            rip_end_datetime      TEXT,
            rip_duration          TEXT,
            job_prepare_time      TEXT,
            output_start_datetime TEXT,
            output_end_datetime   TEXT,
            output_duration       TEXT,
            job_status            TEXT NOT NULL,
            job_info              TEXT,
            unmapped_fields       TEXT,
            created_at            TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_jobs_printer ON rip_jobs(printer_name);
        CREATE INDEX IF NOT EXISTS idx_jobs_status ON rip_jobs(job_status);
        ",
    )?;
    Ok(())
}

pub fn exists_by_hash(conn: &Connection, hash: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM rip_jobs WHERE job_hash = ?1", [hash], |r| r.get(0))
        .optional()?;
    Ok(found.is_some())
}

pub fn insert_job(conn: &Connection, record: &JobRecord) -> Result<i64> {
    let unmapped = if record.unmapped_fields.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&record.unmapped_fields)?)
    };

    conn.execute(
        "INSERT INTO rip_jobs (
            job_hash, table_html, table_html_length, table_number,
            file_path, file_size, file_type, printer_name, port, sender,
            job_type, after_output, dimensions, resolution,
            gray_icc_profile, rgb_icc_profile, cmyk_icc_profile, output_icc_profile,
            color_mode, dither_type, rendering_mode,
            number_of_copies, number_of_pages,
            rip_start_datetime, rip_end_datetime, rip_duration, job_prepare_time,
            output_start_datetime, output_end_datetime, output_duration,
            job_status, job_info, unmapped_fields
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
            ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
            ?31, ?32, ?33
        )",
        rusqlite::params![
            record.job_hash,
            record.table_html,
            record.table_html_length,
            record.sequence_number,
            record.file_path,
            record.file_size,
            record.file_type,
            record.printer_name,
            record.port,
            record.sender,
            record.job_type,
            record.after_output,
            record.dimensions,
            record.resolution,
            record.gray_icc_profile,
            record.rgb_icc_profile,
            record.cmyk_icc_profile,
            record.output_icc_profile,
            record.color_mode,
            record.dither_type,
            record.rendering_mode,
            record.number_of_copies,
            record.number_of_pages,
            record.rip_start_datetime.map(format_ts),
            record.rip_end_datetime.map(format_ts),
            record.rip_duration,
            record.job_prepare_time,
            record.output_start_datetime.map(format_ts),
            record.output_end_datetime.map(format_ts),
            record.output_duration,
            record.job_status,
            record.job_info,
            unmapped,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn format_ts(ts: NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub errors: usize,
    pub unknown: usize,
    pub printers: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> Result<usize> {
        Ok(conn.query_row(sql, [], |r| r.get(0))?)
    };
    Ok(Stats {
        total: count("SELECT COUNT(*) FROM rip_jobs")?,
        completed: count("SELECT COUNT(*) FROM rip_jobs WHERE job_status = 'completed'")?,
        errors: count("SELECT COUNT(*) FROM rip_jobs WHERE job_status = 'error'")?,
        unknown: count("SELECT COUNT(*) FROM rip_jobs WHERE job_status = 'unknown'")?,
        printers: count("SELECT COUNT(DISTINCT printer_name) FROM rip_jobs WHERE printer_name IS NOT NULL")?,
    })
}

// ── Overview ──

pub struct OverviewRow {
    pub id: i64,
    pub table_number: i64,
    pub created_at: String,
    pub job_status: String,
    pub file_path: String,
    pub printer_name: String,
    pub dimensions: String,
    pub rip_start: String,
    pub rip_end: String,
}

pub fn fetch_overview(
    conn: &Connection,
    printer: Option<&str>,
    status: Option<&str>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(p) = printer {
        conditions.push(format!("printer_name LIKE ?{}", params.len() + 1));
        params.push(Box::new(format!("%{}%", p)));
    }
    if let Some(s) = status {
        conditions.push(format!("job_status = ?{}", params.len() + 1));
        params.push(Box::new(s.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT id, table_number, created_at, job_status,
                COALESCE(file_path,''), COALESCE(printer_name,''),
                COALESCE(dimensions,''), COALESCE(rip_start_datetime,''),
                COALESCE(rip_end_datetime,'')
         FROM rip_jobs{}
         ORDER BY created_at DESC, id DESC
         LIMIT {}",
        where_clause, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(OverviewRow {
                id: row.get(0)?,
                table_number: row.get(1)?,
                created_at: row.get(2)?,
                job_status: row.get(3)?,
                file_path: row.get(4)?,
                printer_name: row.get(5)?,
                dimensions: row.get(6)?,
                rip_start: row.get(7)?,
                rip_end: row.get(8)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
pub fn connect_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn insert_and_exists_roundtrip() {
        let conn = connect_in_memory().unwrap();
        let records =
            parser::extract("<TABLE><TR><TH>File:</TH><TD>/a.tif</TD></TR></TABLE>");
        let id = insert_job(&conn, &records[0]).unwrap();
        assert!(id > 0);
        assert!(exists_by_hash(&conn, &records[0].job_hash).unwrap());
        assert!(!exists_by_hash(&conn, "deadbeef").unwrap());
    }

    #[test]
    fn unique_constraint_rejects_same_hash() {
        let conn = connect_in_memory().unwrap();
        let records =
            parser::extract("<TABLE><TR><TH>File:</TH><TD>/a.tif</TD></TR></TABLE>");
        insert_job(&conn, &records[0]).unwrap();
        assert!(insert_job(&conn, &records[0]).is_err());
    }

    #[test]
    fn unmapped_bag_stored_as_json() {
        let conn = connect_in_memory().unwrap();
        let records =
            parser::extract("<TABLE><TR><TH>Widget Count:</TH><TD>5</TD></TR></TABLE>");
        insert_job(&conn, &records[0]).unwrap();
        let json: String = conn
            .query_row("SELECT unmapped_fields FROM rip_jobs", [], |r| r.get(0))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["widget_count"], "5");
    }

    #[test]
    fn overview_filters() {
        let conn = connect_in_memory().unwrap();
        let dump = "<TABLE><TR><TH>Printer:</TH><TD>HP1</TD></TR></TABLE>\
                    <TABLE><TR><TH>Printer:</TH><TD>Mimaki</TD></TR></TABLE>";
        for r in parser::extract(dump) {
            insert_job(&conn, &r).unwrap();
        }
        let all = fetch_overview(&conn, None, None, 50).unwrap();
        assert_eq!(all.len(), 2);
        let hp = fetch_overview(&conn, Some("HP"), None, 50).unwrap();
        assert_eq!(hp.len(), 1);
        assert_eq!(hp[0].printer_name, "HP1");
        let none = fetch_overview(&conn, None, Some("error"), 50).unwrap();
        assert!(none.is_empty());
    }
}
