pub mod clean;
pub mod fields;
pub mod hash;
pub mod record;
pub mod rows;
pub mod segment;
pub mod status;
pub mod values;

pub use record::JobRecord;

/// Full extraction pipeline: dump → table blocks → rows → cleaned cells →
/// canonical fields → inferred status → fingerprint. Pure, no I/O; one
/// record per discovered block, always.
pub fn extract(raw: &str) -> Vec<JobRecord> {
    segment::split_blocks(raw)
        .into_iter()
        .map(|block| {
            let mut record = JobRecord::new(block.html, block.sequence_number);

            for row in rows::field_rows(&record.table_html) {
                let label = clean::clean(&row.raw_label);
                let value = clean::clean(&row.raw_value);

                match fields::map_label(&label) {
                    Some(field) => values::apply(&mut record, field, &value),
                    None => {
                        let slug = fields::slugify(&label);
                        if !slug.is_empty() && !value.is_empty() {
                            record.unmapped_fields.insert(slug, value);
                        }
                    }
                }
            }

            values::fill_rip_from_output(&mut record);
            status::infer(&mut record);
            record.job_hash = hash::fingerprint(&record);
            record
        })
        .collect()
}
