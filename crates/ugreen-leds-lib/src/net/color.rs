//! Link-speed color selection.

use crate::config::NetworkConfig;
use crate::led::Rgb;

/// Fixed per-speed tier color, with the fallback chain for unset tiers.
///
/// `speed` is `None` when the link speed could not be read.
pub fn static_tier_color(config: &NetworkConfig, speed: Option<i64>) -> Rgb {
    let normal = config.color_normal;
    let purple = config.color_link_purple_default;
    match speed {
        Some(100) => config.color_link_100.unwrap_or(normal),
        Some(1000) => config.color_link_1000.unwrap_or(normal),
        Some(2500) => config.color_link_2500.unwrap_or(normal),
        Some(2000) => config.color_link_2000.unwrap_or(purple),
        Some(5000) => config
            .color_link_5000
            .or(config.color_link_10000)
            .unwrap_or(purple),
        Some(10000) => config
            .color_link_10000
            .or(config.color_link_5000)
            .unwrap_or(purple),
        _ => normal,
    }
}

/// Color interpolated between the low and high gradient endpoints.
///
/// Speeds outside the configured range clamp to the endpoints. Equal
/// thresholds or an unreadable speed give the normal color.
pub fn gradient_color(config: &NetworkConfig, speed: Option<i64>) -> Rgb {
    let (low, high) = (config.dynamic_speed_low, config.dynamic_speed_high);
    let Some(speed) = speed else {
        return config.color_normal;
    };
    if low == high {
        return config.color_normal;
    }
    let span = high as f64 - low as f64;
    if span == 0.0 {
        return config.color_normal;
    }
    let t = ((speed as f64 - low as f64) / span).clamp(0.0, 1.0);
    config
        .dynamic_color_low
        .lerp(config.dynamic_color_high, t)
}

/// Color for a reachable link: gradient, then static tier, then normal.
pub fn link_color(config: &NetworkConfig, speed: Option<i64>) -> Rgb {
    if config.check_link_speed_dynamic {
        gradient_color(config, speed)
    } else if config.check_link_speed {
        static_tier_color(config, speed)
    } else {
        config.color_normal
    }
}
