use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// One canonical job record, built from a single `<TABLE>` block.
///
/// Every field is an explicit `Option` so "the export did not carry this
/// value" stays distinct from an empty string or zero. The verbatim block
/// HTML is always kept, even when nothing else could be extracted.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub job_hash: String,
    pub table_html: String,
    pub table_html_length: i64,
    /// 1-based position of the block within its dump.
    pub sequence_number: i64,

    pub file_path: Option<String>,
    pub file_size: Option<String>,
    pub file_type: Option<String>,
    pub printer_name: Option<String>,
    pub port: Option<String>,
    pub sender: Option<String>,
    pub job_type: Option<String>,
    pub after_output: Option<String>,
    pub dimensions: Option<String>,
    pub resolution: Option<String>,
    pub gray_icc_profile: Option<String>,
    pub rgb_icc_profile: Option<String>,
    pub cmyk_icc_profile: Option<String>,
    pub output_icc_profile: Option<String>,
    pub color_mode: Option<String>,
    pub dither_type: Option<String>,
    pub rendering_mode: Option<String>,
    pub number_of_copies: Option<i64>,
    pub number_of_pages: Option<i64>,
    pub rip_start_datetime: Option<NaiveDateTime>,
    pub rip_end_datetime: Option<NaiveDateTime>,
    pub rip_duration: Option<String>,
    pub job_prepare_time: Option<String>,
    pub output_start_datetime: Option<NaiveDateTime>,
    pub output_end_datetime: Option<NaiveDateTime>,
    pub output_duration: Option<String>,
    pub job_status: Option<String>,
    pub job_info: Option<String>,

    /// Labels the mapper could not resolve, keyed by slug. Last write wins
    /// when two raw labels slugify to the same key.
    pub unmapped_fields: BTreeMap<String, String>,
}

impl JobRecord {
    pub fn new(table_html: String, sequence_number: i64) -> Self {
        JobRecord {
            job_hash: String::new(),
            table_html_length: table_html.len() as i64,
            table_html,
            sequence_number,
            file_path: None,
            file_size: None,
            file_type: None,
            printer_name: None,
            port: None,
            sender: None,
            job_type: None,
            after_output: None,
            dimensions: None,
            resolution: None,
            gray_icc_profile: None,
            rgb_icc_profile: None,
            cmyk_icc_profile: None,
            output_icc_profile: None,
            color_mode: None,
            dither_type: None,
            rendering_mode: None,
            number_of_copies: None,
            number_of_pages: None,
            rip_start_datetime: None,
            rip_end_datetime: None,
            rip_duration: None,
            job_prepare_time: None,
            output_start_datetime: None,
            output_end_datetime: None,
            output_duration: None,
            job_status: None,
            job_info: None,
            unmapped_fields: BTreeMap::new(),
        }
    }
}
