use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

use super::record::JobRecord;

const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Deduplication fingerprint: SHA-256 over the identifying subset of fields,
/// `|`-joined with empty values omitted, hex-encoded.
///
/// Fields outside this subset deliberately do not contribute, so cosmetic
/// differences between two exports of the same job hash identically.
pub fn fingerprint(record: &JobRecord) -> String {
    let start = record.rip_start_datetime.or(record.output_start_datetime);
    let end = record.rip_end_datetime.or(record.output_end_datetime);

    let parts: Vec<String> = [
        record.file_path.clone(),
        start.map(format_ts),
        end.map(format_ts),
        record.printer_name.clone(),
        record.dimensions.clone(),
        record.file_size.clone(),
        Some(record.sequence_number.to_string()),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    let mut hasher = Sha256::new();
    hasher.update(parts.join("|").as_bytes());
    hex::encode(hasher.finalize())
}

fn format_ts(ts: NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> JobRecord {
        let mut r = JobRecord::new("<TABLE></TABLE>".to_string(), 1);
        r.file_path = Some("/jobs/a.tif".to_string());
        r.printer_name = Some("HP1".to_string());
        r.rip_start_datetime =
            NaiveDate::from_ymd_opt(2022, 6, 15).unwrap().and_hms_opt(9, 26, 38);
        r
    }

    #[test]
    fn deterministic() {
        let r = record();
        assert_eq!(fingerprint(&r), fingerprint(&r));
        assert_eq!(fingerprint(&r).len(), 64);
    }

    #[test]
    fn insensitive_to_fields_outside_subset() {
        let a = record();
        let mut b = record();
        b.job_info = Some("Salida exitosa".to_string());
        b.unmapped_fields.insert("widget_count".to_string(), "5".to_string());
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn sensitive_to_subset_fields() {
        let a = record();
        let mut b = record();
        b.printer_name = Some("HP2".to_string());
        assert_ne!(fingerprint(&a), fingerprint(&b));

        let mut c = record();
        c.sequence_number = 2;
        assert_ne!(fingerprint(&a), fingerprint(&c));
    }

    #[test]
    fn output_timing_substitutes_for_rip() {
        let mut a = record();
        a.rip_start_datetime = None;
        a.output_start_datetime =
            NaiveDate::from_ymd_opt(2022, 6, 15).unwrap().and_hms_opt(9, 26, 38);
        assert_eq!(fingerprint(&a), fingerprint(&record()));
    }

    #[test]
    fn degenerate_record_still_hashes() {
        let empty = JobRecord::new(String::new(), 1);
        let h = fingerprint(&empty);
        assert_eq!(h.len(), 64);
        assert_eq!(h, fingerprint(&JobRecord::new("other html".to_string(), 1)));
    }
}
