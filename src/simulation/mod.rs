pub mod needcheck;
pub mod population;
pub mod scenario;
pub mod tick;

pub use needcheck::needcheck;
pub use population::{death_check, DeathCause};
pub use scenario::starting_world;
pub use tick::{run_simulation_tick, SimulationEvent};
