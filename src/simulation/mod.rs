pub mod behaviour;
pub mod discovery;
pub mod offline;

pub use behaviour::{step_skai, tick_behaviours, SkaiUpdate};
pub use discovery::{check_discoveries, maybe_spawn_saplings, DiscoveryRule, DISCOVERY_RULES};
pub use offline::{plan_catch_up, simulate_offline_progress, CatchUpPlan};
