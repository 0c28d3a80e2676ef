pub mod agent;
pub mod names;
pub mod needs;
pub mod resources;

pub use agent::{Actor, Agent};
pub use needs::{Characteristics, Gender, NeedType, SkillType};
pub use resources::{ResourceType, Resources};
