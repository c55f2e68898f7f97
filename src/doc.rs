//! Doc-comment text cleanup.
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*//+ ?").unwrap());
static BLOCK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*/\*+\s?").unwrap());
static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s?\*+/\s*$").unwrap());
static BLOCK_GUTTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\* ?").unwrap());

/// Strip comment markers and surrounding blank lines from attached doc text.
///
/// `"// full name\n"` → `"full name"`. Interior lines are kept, trimmed, and
/// joined with `\n`; an all-blank comment becomes `""`.
pub fn normalize(raw: &str) -> String {
    let mut in_block = false;
    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let opened = !in_block && BLOCK_OPEN.is_match(line);
        let mut text = if opened {
            in_block = true;
            BLOCK_OPEN.replace(line, "").into_owned()
        } else {
            line.to_string()
        };

        if in_block {
            // close marker first, so a bare ` */` is not eaten by the gutter
            if BLOCK_CLOSE.is_match(&text) {
                in_block = false;
                text = BLOCK_CLOSE.replace(&text, "").into_owned();
            }
            if !opened {
                text = BLOCK_GUTTER.replace(&text, "").into_owned();
            }
        } else {
            text = LINE_MARKER.replace(&text, "").into_owned();
        }
        lines.push(text.trim().to_string());
    }

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn plain_text_is_trimmed() {
        assert_eq!(normalize("full name\n"), "full name");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\n"), "");
    }

    #[test]
    fn line_comments_lose_markers() {
        assert_eq!(normalize("// age in years"), "age in years");
        assert_eq!(normalize("//first\n// second\n//\n"), "first\nsecond");
    }

    #[test]
    fn block_comments_lose_markers() {
        assert_eq!(normalize("/* created */"), "created");
        assert_eq!(normalize("/**\n * one\n * two\n */"), "one\ntwo");
    }
}
