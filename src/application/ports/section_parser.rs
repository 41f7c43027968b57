use crate::domain::Section;

pub trait SectionParser: Send + Sync {
    fn parse(&self, text: &str) -> Vec<Section>;
}
