//! Name tables for newborn agents

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entity::needs::Gender;

const FEMALE_NAMES: &[&str] = &[
    "Adelita", "Beth", "Brynhilde", "Cassie", "Clothahump", "Desire", "Devdatt", "Esmeralda",
    "Estrelita", "Gamera", "Gloria", "Halie", "Jade", "Jen", "Jessea", "Kauila", "Kiko",
    "Kutsie", "Lacy", "Leonora", "Mandy", "Masa", "Minoaka", "Molly", "Morla", "Oceania",
    "Perdida", "Pinky", "Roshi", "Shelly", "Swift Foot", "Sydney", "Tokka", "Topsy Turvy",
    "Venus", "Vito", "Yamalet",
];

const MALE_NAMES: &[&str] = &[
    "Ace", "Aford", "Anthill", "Aristoteles", "Bante", "Bart", "Bartleby", "Bentley", "Bert",
    "Big Al", "Bobby", "Bosco", "Brutus", "Bubu", "Buddy", "Churchy", "Dewie", "Donatello",
    "Edgar", "Fast", "Franklin", "Fred", "Hercules", "Hobbes", "Homer", "Honu", "Humphrey",
    "Joseph", "Kwei", "Lancelot", "Lazy Lightning", "Leonardo", "Lonesome George", "Longnails",
    "Lump", "Mack", "Maximilian", "Michelangelo", "Norman", "Opuk", "Pancake", "Patch",
    "Pawikan", "Piglet", "Puck", "Rafael", "Ray", "Ringo", "Rover", "Scooter", "Skalman",
    "Slash", "Snapper", "Speedy", "Spike", "Tiger", "Timmy", "Triton", "Tuck", "Turtleneck",
    "Tuttle", "Verne", "Waldo", "Walter", "Xavier", "Yurtle", "Wulfgang",
];

/// Random name from the table for `gender`
pub fn random_name<R: Rng + ?Sized>(gender: Gender, rng: &mut R) -> String {
    let table = match gender {
        Gender::Female => FEMALE_NAMES,
        Gender::Male => MALE_NAMES,
    };
    table.choose(rng).copied().unwrap_or("Turtle").to_string()
}
