//! Disk slots — identity resolution, pool membership and the health monitor.

pub mod mapping;
pub mod models;
pub mod monitor;
pub mod pool;
pub mod state;

pub use mapping::{DiskMapping, MappingMethod, SLOT_LEDS, SlotPlan, plan_slots};
pub use monitor::{DiskMonitor, smart_failed};
pub use pool::{PoolBinding, PoolMap, PoolMember};
pub use state::{DiskEntry, DiskHealth, DiskState, DiskTable};
