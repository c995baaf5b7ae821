use crate::chart::{ChartUnit, Group};

// ---------------------------------------------------------------------------
// ChartGroups – fold accumulator for the per-file pass
// ---------------------------------------------------------------------------

/// Charts collected so far, split by group, each list in file-name order.
#[derive(Debug, Clone, Default)]
pub struct ChartGroups {
    pub group_a: Vec<ChartUnit>,
    pub group_b: Vec<ChartUnit>,
}

impl ChartGroups {
    /// Consume the accumulator and return it with `unit` appended to its group.
    pub fn with(mut self, unit: ChartUnit) -> Self {
        match unit.group {
            Group::A => self.group_a.push(unit),
            Group::B => self.group_b.push(unit),
        }
        self
    }

    /// Positional pairs, at most `limit` of them.
    pub fn pairs(&self, limit: usize) -> Vec<(&ChartUnit, &ChartUnit)> {
        self.group_a
            .iter()
            .zip(self.group_b.iter())
            .take(limit)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.group_a.len() + self.group_b.len()
    }
}
