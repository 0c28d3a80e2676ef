//! Stationary nodes: flags, resource sources and the light pillar

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::entity::resources::{ResourceType, Resources};

/// Which of a node's ledgers a transfer addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerSlot {
    /// Units lying at the node, free for anyone to pick up
    Free,
    /// The natural reserve of a source or the sacrificed pile of a pillar
    Reserve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Plain marker, only holds free resources
    Flag,
    /// Natural supply of one resource kind
    Source {
        resource: ResourceType,
        natural: Resources,
        depleted: bool,
    },
    /// Safety beacon; its radius grows with every sacrificed unit
    LightPillar { sacrificed: Resources },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub position: Vec2,
    pub free: Resources,
    pub kind: NodeKind,
}

impl Node {
    pub fn flag(position: Vec2) -> Self {
        Self {
            position,
            free: Resources::new(),
            kind: NodeKind::Flag,
        }
    }

    pub fn source(position: Vec2, resource: ResourceType, amount: u32) -> Self {
        Self {
            position,
            free: Resources::new(),
            kind: NodeKind::Source {
                resource,
                natural: Resources::with(resource, amount),
                depleted: false,
            },
        }
    }

    pub fn light_pillar(position: Vec2) -> Self {
        Self {
            position,
            free: Resources::new(),
            kind: NodeKind::LightPillar {
                sacrificed: Resources::new(),
            },
        }
    }

    /// Resource kind produced by a source
    pub fn natural_resource(&self) -> Option<ResourceType> {
        match &self.kind {
            NodeKind::Source { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    /// Flag a source as run dry. Yields its resource kind the first time
    /// only.
    pub fn mark_depleted(&mut self) -> Option<ResourceType> {
        match &mut self.kind {
            NodeKind::Source { resource, depleted, .. } if !*depleted => {
                *depleted = true;
                Some(*resource)
            }
            _ => None,
        }
    }

    pub fn is_light_pillar(&self) -> bool {
        matches!(self.kind, NodeKind::LightPillar { .. })
    }

    pub fn ledger(&self, slot: LedgerSlot) -> Option<&Resources> {
        match (slot, &self.kind) {
            (LedgerSlot::Free, _) => Some(&self.free),
            (LedgerSlot::Reserve, NodeKind::Source { natural, .. }) => Some(natural),
            (LedgerSlot::Reserve, NodeKind::LightPillar { sacrificed }) => Some(sacrificed),
            (LedgerSlot::Reserve, NodeKind::Flag) => None,
        }
    }

    pub fn ledger_mut(&mut self, slot: LedgerSlot) -> Option<&mut Resources> {
        match (slot, &mut self.kind) {
            (LedgerSlot::Free, _) => Some(&mut self.free),
            (LedgerSlot::Reserve, NodeKind::Source { natural, .. }) => Some(natural),
            (LedgerSlot::Reserve, NodeKind::LightPillar { sacrificed }) => Some(sacrificed),
            (LedgerSlot::Reserve, NodeKind::Flag) => None,
        }
    }

    /// Units sacrificed at a pillar
    pub fn sacrificed_units(&self) -> u32 {
        match &self.kind {
            NodeKind::LightPillar { sacrificed } => sacrificed.total(),
            _ => 0,
        }
    }

    /// Safety radius of a light pillar
    pub fn influence_radius(&self, config: &SimulationConfig) -> Option<f32> {
        self.is_light_pillar().then(|| {
            config.default_light_pillar_radius
                + self.sacrificed_units() as f32 * config.sacrificed_units_distance_ratio
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_reserve_holds_its_kind() {
        let node = Node::source(Vec2::new(1.0, 1.0), ResourceType::Food, 100);
        assert_eq!(node.natural_resource(), Some(ResourceType::Food));
        let reserve = node.ledger(LedgerSlot::Reserve).unwrap();
        assert_eq!(reserve.get(ResourceType::Food), 100);
        assert!(node.ledger(LedgerSlot::Free).unwrap().is_empty());
    }

    #[test]
    fn test_flag_has_no_reserve() {
        let mut node = Node::flag(Vec2::default());
        assert!(node.ledger(LedgerSlot::Reserve).is_none());
        assert!(node.ledger_mut(LedgerSlot::Reserve).is_none());
        assert!(node.influence_radius(&SimulationConfig::default()).is_none());
    }

    #[test]
    fn test_pillar_radius_grows_with_sacrifice() {
        let config = SimulationConfig::default();
        let mut pillar = Node::light_pillar(Vec2::new(16.0, 16.0));
        assert_eq!(pillar.influence_radius(&config), Some(5.0));

        pillar
            .ledger_mut(LedgerSlot::Reserve)
            .unwrap()
            .add(ResourceType::Sacrifice, 10);
        let radius = pillar.influence_radius(&config).unwrap();
        assert!((radius - 6.0).abs() < 1e-5);
    }
}
