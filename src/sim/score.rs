//! Obstacles-cleared counter

/// Current run score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Add one cleared obstacle, returning the new total
    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}
