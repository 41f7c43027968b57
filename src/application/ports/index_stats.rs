use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexStats {
    pub total_vector_count: u64,
    pub dimension: Option<usize>,
    pub metric: Option<String>,
    pub vector_type: Option<String>,
    pub namespaces: BTreeMap<String, u64>,
}
