use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::fields::Field;
use super::record::JobRecord;

static TIME_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2}):(\d{2})\s+(\d{1,2})/(\d{1,2})/(\d{4})").unwrap()
});
static DATE_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());
static LEADING_INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)").unwrap());

/// Set a canonical field from its cleaned value, coercing per field type.
///
/// An empty value or the literal "N/A" leaves the field unset, as does any
/// coercion failure. A field already set by an earlier row is never
/// overwritten; the only later mutation allowed is the output→RIP copy in
/// [`fill_rip_from_output`].
pub fn apply(record: &mut JobRecord, field: Field, value: &str) {
    if value.is_empty() || value == "N/A" {
        return;
    }

    match field {
        Field::NumberOfCopies => set(&mut record.number_of_copies, parse_leading_int(value)),
        Field::NumberOfPages => set(&mut record.number_of_pages, parse_leading_int(value)),
        Field::RipStartDatetime => set(&mut record.rip_start_datetime, parse_datetime(value)),
        Field::RipEndDatetime => set(&mut record.rip_end_datetime, parse_datetime(value)),
        Field::OutputStartDatetime => set(&mut record.output_start_datetime, parse_datetime(value)),
        Field::OutputEndDatetime => set(&mut record.output_end_datetime, parse_datetime(value)),
        _ => {
            let slot = text_slot(record, field);
            set(slot, Some(value.to_string()));
        }
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn text_slot(record: &mut JobRecord, field: Field) -> &mut Option<String> {
    match field {
        Field::FilePath => &mut record.file_path,
        Field::FileSize => &mut record.file_size,
        Field::FileType => &mut record.file_type,
        Field::PrinterName => &mut record.printer_name,
        Field::Port => &mut record.port,
        Field::Sender => &mut record.sender,
        Field::JobType => &mut record.job_type,
        Field::AfterOutput => &mut record.after_output,
        Field::Dimensions => &mut record.dimensions,
        Field::Resolution => &mut record.resolution,
        Field::GrayIccProfile => &mut record.gray_icc_profile,
        Field::RgbIccProfile => &mut record.rgb_icc_profile,
        Field::CmykIccProfile => &mut record.cmyk_icc_profile,
        Field::OutputIccProfile => &mut record.output_icc_profile,
        Field::ColorMode => &mut record.color_mode,
        Field::DitherType => &mut record.dither_type,
        Field::RenderingMode => &mut record.rendering_mode,
        Field::RipDuration => &mut record.rip_duration,
        Field::JobPrepareTime => &mut record.job_prepare_time,
        Field::OutputDuration => &mut record.output_duration,
        Field::JobStatus => &mut record.job_status,
        Field::JobInfo => &mut record.job_info,
        Field::NumberOfCopies
        | Field::NumberOfPages
        | Field::RipStartDatetime
        | Field::RipEndDatetime
        | Field::OutputStartDatetime
        | Field::OutputEndDatetime => unreachable!("typed fields handled in apply"),
    }
}

fn parse_leading_int(value: &str) -> Option<i64> {
    LEADING_INT_RE.captures(value)?[1].parse().ok()
}

/// Parse the export's timestamp encodings, first hit wins:
/// "H:MM:SS D/M/YYYY", then "D/M/YYYY" at midnight, then a couple of
/// ISO-ish shapes as a last resort.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Some(c) = TIME_DATE_RE.captures(value) {
        let date = NaiveDate::from_ymd_opt(
            c[6].parse().ok()?,
            c[5].parse().ok()?,
            c[4].parse().ok()?,
        )?;
        return date.and_hms_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?);
    }

    if let Some(c) = DATE_ONLY_RE.captures(value) {
        let date = NaiveDate::from_ymd_opt(
            c[3].parse().ok()?,
            c[2].parse().ok()?,
            c[1].parse().ok()?,
        )?;
        return date.and_hms_opt(0, 0, 0);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Some export variants report only output-phase timing for what other
/// variants call RIP timing. Copy output values into unset RIP counterparts;
/// present RIP values are left alone.
pub fn fill_rip_from_output(record: &mut JobRecord) {
    if record.rip_start_datetime.is_none() {
        record.rip_start_datetime = record.output_start_datetime;
    }
    if record.rip_end_datetime.is_none() {
        record.rip_end_datetime = record.output_end_datetime;
    }
    if record.rip_duration.is_none() {
        record.rip_duration = record.output_duration.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn combined_time_date() {
        assert_eq!(parse_datetime("9:26:38 15/06/2022"), Some(dt(2022, 6, 15, 9, 26, 38)));
        assert_eq!(parse_datetime("10:04:27 03/07/2025"), Some(dt(2025, 7, 3, 10, 4, 27)));
    }

    #[test]
    fn date_only_defaults_to_midnight() {
        assert_eq!(parse_datetime("03/07/2025"), Some(dt(2025, 7, 3, 0, 0, 0)));
    }

    #[test]
    fn generic_fallback() {
        assert_eq!(parse_datetime("2022-06-15T09:26:38"), Some(dt(2022, 6, 15, 9, 26, 38)));
        assert_eq!(parse_datetime("2022-06-15"), Some(dt(2022, 6, 15, 0, 0, 0)));
    }

    #[test]
    fn garbage_is_unset() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime("99/99/2022"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn leading_int() {
        assert_eq!(parse_leading_int("3 copies"), Some(3));
        assert_eq!(parse_leading_int("  12"), Some(12));
        assert_eq!(parse_leading_int("many"), None);
    }

    #[test]
    fn na_and_empty_leave_unset() {
        let mut r = JobRecord::new(String::new(), 1);
        apply(&mut r, Field::FilePath, "N/A");
        apply(&mut r, Field::FilePath, "");
        assert!(r.file_path.is_none());
        apply(&mut r, Field::NumberOfCopies, "not a number");
        assert!(r.number_of_copies.is_none());
    }

    #[test]
    fn first_write_wins() {
        let mut r = JobRecord::new(String::new(), 1);
        apply(&mut r, Field::PrinterName, "HP1");
        apply(&mut r, Field::PrinterName, "HP2");
        assert_eq!(r.printer_name.as_deref(), Some("HP1"));
    }

    #[test]
    fn output_copied_into_unset_rip() {
        let mut r = JobRecord::new(String::new(), 1);
        r.output_start_datetime = Some(dt(2025, 7, 3, 10, 0, 0));
        r.output_duration = Some("00:05:00".to_string());
        fill_rip_from_output(&mut r);
        assert_eq!(r.rip_start_datetime, r.output_start_datetime);
        assert_eq!(r.rip_duration.as_deref(), Some("00:05:00"));
    }

    #[test]
    fn rip_never_overwritten_by_output() {
        let mut r = JobRecord::new(String::new(), 1);
        r.rip_end_datetime = Some(dt(2025, 7, 3, 9, 0, 0));
        r.output_end_datetime = Some(dt(2025, 7, 3, 10, 0, 0));
        fill_rip_from_output(&mut r);
        assert_eq!(r.rip_end_datetime, Some(dt(2025, 7, 3, 9, 0, 0)));
    }
}
