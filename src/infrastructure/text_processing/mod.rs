mod heading_section_parser;
mod pdf_adapter;
mod text_sanitizer;
mod word_window_splitter;

pub use heading_section_parser::HeadingSectionParser;
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::{clean_page_text, sanitize_extracted_text, strip_boilerplate};
pub use word_window_splitter::WordWindowSplitter;
