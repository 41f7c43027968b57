pub const DEFAULT_SECTION: &str = "General";
pub const DEFAULT_SUBSECTION: &str = "Introducción";

/// A run of body text under the headings that precede it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub subsection: String,
    pub content: String,
}
