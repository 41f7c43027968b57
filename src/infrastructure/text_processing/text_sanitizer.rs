use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Running headers, figure credits, links, page counters and stray symbols
/// that repeat across the anatomy slides and manual.
static BOILERPLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Netter, F\. H\.: Atlas of Human Anatomy.*?\.",
        r"Netter.*Atlas of Human Anatomy",
        r"Complemento Anatomía Funcional Humana",
        r"Universidad.*Anáhuac",
        r"Facultad.*Medicina",
        r"https?://\S+",
        r"www\.[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
        r"Figura \d+.*?Netter",
        r"Página \d+",
        r"Page \d+",
        r"[^\w\s.,;:!?\-()áéíóúüñÁÉÍÓÚÜÑ]",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).unwrap())
    .collect()
});

/// Normalizes raw extractor output: NFKC (splits ligatures), joins words
/// hyphenated across a line break, collapses runs of spaces and keeps blank
/// lines only as single paragraph breaks.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");
    join_lines(de_hyphenated.lines().map(str::to_string))
}

/// Removes boilerplate from a single line and collapses the leftovers.
pub fn strip_boilerplate(line: &str) -> String {
    let stripped = BOILERPLATE
        .iter()
        .fold(line.to_string(), |text, pattern| {
            pattern.replace_all(&text, "").into_owned()
        });

    let mut out = String::with_capacity(stripped.len());
    collapse_internal_whitespace(stripped.trim(), &mut out);
    out
}

/// Full cleaning pass for one extracted page. Boilerplate is stripped line by
/// line, then the page is collapsed to a single line of text.
pub fn clean_page_text(raw: &str) -> String {
    let sanitized = sanitize_extracted_text(raw);
    sanitized
        .lines()
        .map(strip_boilerplate)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_lines(lines: impl Iterator<Item = String>) -> String {
    let mut result = String::new();
    let mut prev_was_blank = false;

    for line in lines {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            prev_was_blank = true;
            continue;
        }

        if !result.is_empty() {
            result.push_str(if prev_was_blank { "\n\n" } else { "\n" });
        }
        collapse_internal_whitespace(trimmed, &mut result);
        prev_was_blank = false;
    }

    result
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
