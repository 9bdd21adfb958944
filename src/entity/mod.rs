pub mod archetype;
pub mod skai;

pub use archetype::{SkaiArchetype, SkaiCategory};
pub use skai::{Skai, SkaiMood};
