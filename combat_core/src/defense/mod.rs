//! Defense system - The individual steps of the mitigation chain
//!
//! Every function here is pure: attributes and constants in, a number or a
//! verdict out. Ordering and side effects live in `combat::resolution`.

mod armour;
mod avoidance;
mod environment;
mod resistance;

pub use armour::{apply_armor, apply_toughness, armor_reduction};
pub use avoidance::{critical_multiplier, roll_chance};
pub use environment::{environment_mitigation, EnvironmentMitigation};
pub use resistance::{apply_resistance, vulnerability_multiplier};
