//! Typed handle over a single named LED.

use std::fmt;
use std::sync::Arc;

use super::{LedClass, Result, Rgb, parse_rgb};

/// LED trigger modes used by the monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    None,
    /// One blink per write to `shot`.
    Oneshot,
    /// Kernel-driven link/tx/rx blinking for a network device.
    Netdev,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::None => "none",
            Trigger::Oneshot => "oneshot",
            Trigger::Netdev => "netdev",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named LED on a shared [`LedClass`].
#[derive(Clone)]
pub struct Led {
    name: String,
    class: Arc<dyn LedClass>,
}

impl fmt::Debug for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Led").field("name", &self.name).finish()
    }
}

impl Led {
    pub fn new(class: Arc<dyn LedClass>, name: impl Into<String>) -> Self {
        Led {
            name: name.into(),
            class,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self) -> bool {
        self.class.exists(&self.name)
    }

    pub fn write(&self, attr: &str, value: &str) -> Result<()> {
        self.class.write(&self.name, attr, value)
    }

    pub fn read(&self, attr: &str) -> Result<String> {
        self.class.read(&self.name, attr)
    }

    pub fn set_trigger(&self, trigger: Trigger) -> Result<()> {
        self.write("trigger", trigger.as_str())
    }

    pub fn set_color(&self, color: Rgb) -> Result<()> {
        self.write("color", &color.to_string())
    }

    /// Current color as stored by the driver.
    pub fn color(&self) -> Result<Rgb> {
        self.read("color").map(|s| parse_rgb(&s))
    }

    pub fn set_brightness(&self, brightness: i32) -> Result<()> {
        self.write("brightness", &brightness.to_string())
    }

    /// Fire a single blink (oneshot trigger only).
    pub fn shot(&self) -> Result<()> {
        self.write("shot", "1")
    }

    pub fn set_invert(&self, invert: bool) -> Result<()> {
        self.write("invert", flag(invert))
    }

    pub fn set_delay_on(&self, ms: u32) -> Result<()> {
        self.write("delay_on", &ms.to_string())
    }

    pub fn set_delay_off(&self, ms: u32) -> Result<()> {
        self.write("delay_off", &ms.to_string())
    }

    // netdev trigger attributes

    pub fn set_device_name(&self, iface: &str) -> Result<()> {
        self.write("device_name", iface)
    }

    pub fn set_link(&self, on: bool) -> Result<()> {
        self.write("link", flag(on))
    }

    pub fn set_tx(&self, value: i32) -> Result<()> {
        self.write("tx", &value.to_string())
    }

    pub fn set_rx(&self, value: i32) -> Result<()> {
        self.write("rx", &value.to_string())
    }

    pub fn set_interval(&self, ms: i32) -> Result<()> {
        self.write("interval", &ms.to_string())
    }

    /// Turn the LED off and detach it from any trigger.
    pub fn disable(&self) -> Result<()> {
        self.set_brightness(0)?;
        self.set_trigger(Trigger::None)
    }
}

fn flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}
