use std::sync::LazyLock;

use regex::Regex;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table[^>]*>.*?</table>").unwrap());

/// One `<TABLE>…</TABLE>` span found in a dump, verbatim.
#[derive(Debug, Clone)]
pub struct TableBlock {
    pub html: String,
    /// 1-based position among the blocks of this dump.
    pub sequence_number: i64,
}

/// Split a raw dump into table blocks in document order.
///
/// Greedy non-overlapping scan: each closing tag terminates the nearest
/// unterminated opener, so nesting is not a thing here. An opener with no
/// closing tag is dropped rather than reported.
pub fn split_blocks(raw: &str) -> Vec<TableBlock> {
    TABLE_RE
        .find_iter(raw)
        .enumerate()
        .map(|(i, m)| TableBlock {
            html: m.as_str().to_string(),
            sequence_number: (i + 1) as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dump() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("<p>no tables here</p>").is_empty());
    }

    #[test]
    fn two_blocks_in_order() {
        let raw = "junk <TABLE a=1>first</TABLE> mid <table>second</table> tail";
        let blocks = split_blocks(raw);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].sequence_number, 1);
        assert_eq!(blocks[0].html, "<TABLE a=1>first</TABLE>");
        assert_eq!(blocks[1].sequence_number, 2);
        assert!(blocks[1].html.contains("second"));
    }

    #[test]
    fn unterminated_opener_skipped() {
        let raw = "<TABLE>never closed... <TABLE>ok</TABLE>";
        let blocks = split_blocks(raw);
        // The first opener pairs with the only closing tag; the inner opener
        // is swallowed verbatim.
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].html.ends_with("</TABLE>"));
    }

    #[test]
    fn case_insensitive_markers() {
        let blocks = split_blocks("<TaBlE border=\"1\">x</tAbLe>");
        assert_eq!(blocks.len(), 1);
    }
}
