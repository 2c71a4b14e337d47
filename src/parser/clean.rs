use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw cell's inner text: strip sub-markup, decode the four
/// common entities, collapse whitespace (incl. U+00A0) to single spaces,
/// and trim.
pub fn clean(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace('\u{a0}', " ");
    WS_RE.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        assert_eq!(clean("<B>File&nbsp;Size:</B>"), "File Size:");
        assert_eq!(clean("a&amp;b &lt;c&gt;"), "a&b <c>");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean("  a \t\n b\u{a0}\u{a0}c  "), "a b c");
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   <I></I>  "), "");
    }

    #[test]
    fn idempotent() {
        for s in ["<TH> Impresora: </TH>", "a  b\u{a0}c", "plain", ""] {
            let once = clean(s);
            assert_eq!(clean(&once), once);
        }
    }
}
