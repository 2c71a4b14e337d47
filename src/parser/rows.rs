use std::sync::LazyLock;

use regex::Regex;

static TR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>.*?</tr>").unwrap());
static TH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<th[^>]*>(.*?)</th>").unwrap());
static TD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").unwrap());

/// One (label, value) pair pulled from a table row, still raw HTML inside.
#[derive(Debug)]
pub struct FieldRow {
    pub raw_label: String,
    pub raw_value: String,
}

/// Extract (TH, TD) pairs from a block's rows, in document order.
///
/// Rows missing either cell are spacer/divider rows and are skipped.
pub fn field_rows(block_html: &str) -> Vec<FieldRow> {
    TR_RE
        .find_iter(block_html)
        .filter_map(|row| {
            let row = row.as_str();
            let th = TH_RE.captures(row)?;
            let td = TD_RE.captures(row)?;
            Some(FieldRow {
                raw_label: th[1].to_string(),
                raw_value: td[1].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_data_pair() {
        let rows = field_rows("<TABLE><TR><TH>File:</TH><TD>/a.tif</TD></TR></TABLE>");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].raw_label, "File:");
        assert_eq!(rows[0].raw_value, "/a.tif");
    }

    #[test]
    fn spacer_rows_skipped() {
        let html = "<TABLE>\
            <TR><TD colspan=2><HR></TD></TR>\
            <TR><TH>Printer:</TH><TD>HP1</TD></TR>\
            <TR><TH>Only header</TH></TR>\
            </TABLE>";
        let rows = field_rows(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].raw_label, "Printer:");
    }

    #[test]
    fn first_cells_win_within_row() {
        let html = "<TR><TH>A</TH><TH>B</TH><TD>1</TD><TD>2</TD></TR>";
        let rows = field_rows(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].raw_label, "A");
        assert_eq!(rows[0].raw_value, "1");
    }

    #[test]
    fn order_preserved() {
        let html = "<TR><TH>x</TH><TD>1</TD></TR><TR><TH>y</TH><TD>2</TD></TR>";
        let labels: Vec<String> = field_rows(html).into_iter().map(|r| r.raw_label).collect();
        assert_eq!(labels, vec!["x", "y"]);
    }
}
