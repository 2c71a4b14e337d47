use super::record::JobRecord;

const SUCCESS_TOKENS: &[&str] = &["successfully", "exitosa", "completado"];
const ERROR_TOKENS: &[&str] = &["error", "fallo"];

/// Fill in `job_status` when no row stated one. Total: every record leaves
/// here with a status.
///
/// Info text wins when present; otherwise a completion timestamp on either
/// phase is taken as evidence of success.
pub fn infer(record: &mut JobRecord) {
    if record.job_status.is_some() {
        return;
    }

    record.job_status = Some(match &record.job_info {
        Some(info) => {
            let info = info.to_lowercase();
            if SUCCESS_TOKENS.iter().any(|t| info.contains(t)) {
                "completed"
            } else if ERROR_TOKENS.iter().any(|t| info.contains(t)) {
                "error"
            } else {
                "unknown"
            }
        }
        None => {
            if record.rip_end_datetime.is_some() || record.output_end_datetime.is_some() {
                "completed"
            } else {
                "unknown"
            }
        }
    }
    .to_string());
}
