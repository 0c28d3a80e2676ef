pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod trial;
pub mod types;

pub use clock::SimClock;
pub use config::SimulationConfig;
pub use context::SimContext;
pub use trial::Randomizer;
