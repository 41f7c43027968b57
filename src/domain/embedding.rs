use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// A vector with every component set to the same positive value, used to
    /// sample a cosine index where the zero vector is rejected.
    pub fn uniform(dimensions: usize) -> Self {
        let value = if dimensions == 0 {
            0.0
        } else {
            1.0 / (dimensions as f32).sqrt()
        };
        Self::new(vec![value; dimensions])
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }
}
