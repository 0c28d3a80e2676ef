//! Socialize groups: rosters of agents gathering at a point

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{AgentId, GroupId, Vec2};
use crate::entity::needs::Gender;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocializeGroup {
    id: GroupId,
    pub position: Vec2,
    males: Vec<AgentId>,
    females: Vec<AgentId>,
    children: Vec<AgentId>,
}

impl SocializeGroup {
    pub fn new(id: GroupId, position: Vec2) -> Self {
        Self {
            id,
            position,
            males: Vec::new(),
            females: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    fn contains(&self, agent: AgentId) -> bool {
        self.males.contains(&agent) || self.females.contains(&agent) || self.children.contains(&agent)
    }

    fn roster_mut(&mut self, gender: Gender) -> &mut Vec<AgentId> {
        match gender {
            Gender::Male => &mut self.males,
            Gender::Female => &mut self.females,
        }
    }

    /// Add an agent to the child roster or its gender roster
    pub fn register(&mut self, agent: AgentId, gender: Gender, is_child: bool) -> Result<()> {
        if self.contains(agent) {
            return Err(SimError::AlreadyRegistered {
                agent,
                group: self.id,
            });
        }
        if is_child {
            self.children.push(agent);
        } else {
            self.roster_mut(gender).push(agent);
        }
        Ok(())
    }

    pub fn unregister(&mut self, agent: AgentId) -> Result<()> {
        for roster in [&mut self.males, &mut self.females, &mut self.children] {
            if let Some(index) = roster.iter().position(|member| *member == agent) {
                roster.remove(index);
                return Ok(());
            }
        }
        Err(SimError::NotRegistered {
            agent,
            group: self.id,
        })
    }

    /// Move a grown-up member from the child roster to its gender roster
    pub fn child_to_adult(&mut self, agent: AgentId, gender: Gender) -> Result<()> {
        let index = self
            .children
            .iter()
            .position(|member| *member == agent)
            .ok_or(SimError::NotRegistered {
                agent,
                group: self.id,
            })?;
        self.children.remove(index);
        self.roster_mut(gender).push(agent);
        Ok(())
    }

    /// At least one adult of each gender present
    pub fn is_reproducible(&self) -> bool {
        !self.males.is_empty() && !self.females.is_empty()
    }

    /// Uniformly chosen adult of the gender opposite to `gender`
    pub fn random_partner<R: Rng + ?Sized>(&self, gender: Gender, rng: &mut R) -> Option<AgentId> {
        let roster = match gender.opposite() {
            Gender::Male => &self.males,
            Gender::Female => &self.females,
        };
        roster.choose(rng).copied()
    }

    pub fn member_count(&self) -> usize {
        self.males.len() + self.females.len() + self.children.len()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn group() -> SocializeGroup {
        SocializeGroup::new(GroupId(0), Vec2::new(15.0, 15.0))
    }

    #[test]
    fn test_double_registration_fails() {
        let mut g = group();
        g.register(AgentId(1), Gender::Male, false).unwrap();
        let result = g.register(AgentId(1), Gender::Male, true);
        assert!(matches!(result, Err(SimError::AlreadyRegistered { .. })));
        assert_eq!(g.member_count(), 1);
    }

    #[test]
    fn test_unregister_searches_all_rosters() {
        let mut g = group();
        g.register(AgentId(1), Gender::Female, true).unwrap();
        g.register(AgentId(2), Gender::Male, false).unwrap();
        g.unregister(AgentId(1)).unwrap();
        g.unregister(AgentId(2)).unwrap();
        assert!(g.is_empty());
        assert!(matches!(
            g.unregister(AgentId(2)),
            Err(SimError::NotRegistered { .. })
        ));
    }

    #[test]
    fn test_reproducible_needs_both_genders() {
        let mut g = group();
        g.register(AgentId(1), Gender::Male, false).unwrap();
        g.register(AgentId(2), Gender::Female, true).unwrap();
        assert!(!g.is_reproducible());

        g.child_to_adult(AgentId(2), Gender::Female).unwrap();
        assert!(g.is_reproducible());
        assert_eq!(g.child_count(), 0);
    }

    #[test]
    fn test_partner_has_opposite_gender() {
        let mut g = group();
        g.register(AgentId(1), Gender::Male, false).unwrap();
        g.register(AgentId(2), Gender::Female, false).unwrap();
        g.register(AgentId(3), Gender::Female, false).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let partner = g.random_partner(Gender::Male, &mut rng).unwrap();
            assert!(partner == AgentId(2) || partner == AgentId(3));
            assert_eq!(g.random_partner(Gender::Female, &mut rng), Some(AgentId(1)));
        }
    }
}
