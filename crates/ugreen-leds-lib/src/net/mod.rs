//! Network health — gateway reachability and link-speed colors on netdev LEDs.

pub mod color;
mod monitor;

pub use color::{gradient_color, link_color, static_tier_color};
pub use monitor::{NetMonitor, netdev_led_name, parse_default_gateway};
