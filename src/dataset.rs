/// An attribute id with its value, as stored by the trainer
#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    pub id: u32,
    pub value: f64,
}

/// Interned attributes of one token
pub type Item = Vec<Attribute>;

/// One training sequence: interned items and label ids
#[derive(Debug, Clone)]
pub struct Instance {
    pub items: Vec<Item>,
    pub labels: Vec<u32>,
    pub weight: f64,
}

impl Attribute {
    pub fn new(id: u32, value: f64) -> Self {
        Self { id, value }
    }
}

impl Instance {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            labels: Vec::with_capacity(cap),
            weight: 1.0,
        }
    }

    pub fn push(&mut self, item: Item, label: u32) {
        self.items.push(item);
        self.labels.push(label);
    }

    /// Number of positions in the sequence
    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
