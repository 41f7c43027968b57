use regex::Regex;
use std::sync::LazyLock;

use crate::application::ports::SectionParser;
use crate::domain::{DEFAULT_SECTION, DEFAULT_SUBSECTION, Section};

static SECTION_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(\d+\.\s*)([A-ZÁÉÍÓÚÜÑ][^.!?]*)$",
        r"^([A-ZÁÉÍÓÚÜÑ][^.!?]{3,50})$",
        r"^(\d+\.\d+\s*)([A-ZÁÉÍÓÚÜÑ][^.!?]*)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SUBSECTION_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^([a-záéíóúüñ][^.!?]{3,30})$",
        r"^(\d+\.\d+\.\d+\s*)([A-ZÁÉÍÓÚÜÑ][^.!?]*)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Line-oriented heading detection. Numbered or short capitalised lines open
/// a section, short lowercase or three-level numbered lines open a
/// subsection, everything else is body text.
///
/// A heading only takes effect once body text follows it, and heading lines
/// stay in the emitted content so no page text is dropped.
#[derive(Debug, Default)]
pub struct HeadingSectionParser;

enum Heading {
    Section(String),
    Subsection(String),
}

impl HeadingSectionParser {
    pub fn new() -> Self {
        Self
    }

    fn heading_title(patterns: &[Regex], line: &str) -> Option<String> {
        patterns.iter().find_map(|pattern| {
            let captures = pattern.captures(line)?;
            let title = captures.get(2).or_else(|| captures.get(1))?;
            Some(title.as_str().trim().to_string())
        })
    }

    fn classify(line: &str) -> Option<Heading> {
        Self::heading_title(&SECTION_HEADINGS, line)
            .map(Heading::Section)
            .or_else(|| Self::heading_title(&SUBSECTION_HEADINGS, line).map(Heading::Subsection))
    }
}

impl SectionParser for HeadingSectionParser {
    fn parse(&self, text: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut title = DEFAULT_SECTION.to_string();
        let mut subsection = DEFAULT_SUBSECTION.to_string();
        let mut content: Vec<&str> = Vec::new();
        let mut pending: Vec<(&str, Heading)> = Vec::new();

        let mut flush = |title: &str, subsection: &str, content: &mut Vec<&str>| {
            if !content.is_empty() {
                sections.push(Section {
                    title: title.to_string(),
                    subsection: subsection.to_string(),
                    content: content.join("\n"),
                });
                content.clear();
            }
        };

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(heading) = Self::classify(line) {
                pending.push((line, heading));
                continue;
            }

            if !pending.is_empty() {
                flush(&title, &subsection, &mut content);
                for (heading_line, heading) in pending.drain(..) {
                    match heading {
                        Heading::Section(heading) => {
                            title = heading;
                            subsection = DEFAULT_SECTION.to_string();
                        }
                        Heading::Subsection(heading) => subsection = heading,
                    }
                    content.push(heading_line);
                }
            }
            content.push(line);
        }

        // Trailing headings with no body stay plain text of the open section.
        content.extend(pending.into_iter().map(|(line, _)| line));
        flush(&title, &subsection, &mut content);
        sections
    }
}
