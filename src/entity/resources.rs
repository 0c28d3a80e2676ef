//! Resource ledger - fixed counter per resource kind

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Kind of resource on the island
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[display(fmt = "Fish")]
    Food,
    #[display(fmt = "Flowers")]
    Happiness,
    #[display(fmt = "Gold")]
    Sacrifice,
}

impl ResourceType {
    pub const COUNT: usize = 3;

    pub const ALL: [ResourceType; Self::COUNT] = [
        ResourceType::Food,
        ResourceType::Happiness,
        ResourceType::Sacrifice,
    ];

    fn index(self) -> usize {
        match self {
            ResourceType::Food => 0,
            ResourceType::Happiness => 1,
            ResourceType::Sacrifice => 2,
        }
    }
}

/// Non-negative resource counts, one per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    counts: [u32; ResourceType::COUNT],
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-filled with `amount` units of one kind
    pub fn with(resource: ResourceType, amount: u32) -> Self {
        let mut ledger = Self::new();
        ledger.add(resource, amount);
        ledger
    }

    /// Get current amount of a resource
    pub fn get(&self, resource: ResourceType) -> u32 {
        self.counts[resource.index()]
    }

    pub fn add(&mut self, resource: ResourceType, amount: u32) {
        let count = &mut self.counts[resource.index()];
        *count = count.saturating_add(amount);
    }

    /// Remove resources clamping at zero, returns amount actually removed
    pub fn remove(&mut self, resource: ResourceType, amount: u32) -> u32 {
        let count = &mut self.counts[resource.index()];
        let removed = amount.min(*count);
        *count -= removed;
        removed
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate kinds with a positive count
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        ResourceType::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|(_, amount)| *amount > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_add_remove() {
        let mut ledger = Resources::new();
        ledger.add(ResourceType::Food, 30);
        assert_eq!(ledger.get(ResourceType::Food), 30);
        assert_eq!(ledger.remove(ResourceType::Food, 20), 20);
        assert_eq!(ledger.get(ResourceType::Food), 10);
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let mut ledger = Resources::with(ResourceType::Sacrifice, 3);
        assert_eq!(ledger.remove(ResourceType::Sacrifice, 10), 3);
        assert_eq!(ledger.get(ResourceType::Sacrifice), 0);
        assert_eq!(ledger.remove(ResourceType::Happiness, 1), 0);
    }

    #[test]
    fn test_iter_skips_empty_kinds() {
        let mut ledger = Resources::new();
        ledger.add(ResourceType::Happiness, 2);
        let kinds: Vec<_> = ledger.iter().collect();
        assert_eq!(kinds, vec![(ResourceType::Happiness, 2)]);
        assert_eq!(ledger.total(), 2);
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ResourceType::Food.to_string(), "Fish");
        assert_eq!(ResourceType::Sacrifice.to_string(), "Gold");
    }
}
