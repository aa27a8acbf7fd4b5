//! Model profiles — physical slot order of UGREEN NAS chassis.
//!
//! The front-panel LEDs `disk1..disk8` are numbered left to right, but the
//! SATA ports behind them are not wired in that order on every chassis.
//! A profile lists, per slot, the ATA port number; HCTL host numbers follow
//! from it (`ataN` ↔ host `N-1`). Unknown models get `None` from
//! [`detect_model`], which callers treat as "default order".

/// Slot wiring profile for a UGREEN NAS model.
#[derive(Debug)]
pub struct ModelProfile {
    /// Product-name prefix as reported by DMI.
    pub name: &'static str,
    /// ATA port number (1-based) per slot, slot 1 first.
    pub ata_ports: &'static [u8],
}

impl ModelProfile {
    /// Slot keys for positional-bus mapping (`ata3`, `ata4`, ...).
    pub fn ata_keys(&self) -> Vec<String> {
        self.ata_ports.iter().map(|p| format!("ata{p}")).collect()
    }

    /// Slot keys for topology mapping (`2:0:0:0`, ...).
    pub fn hctl_keys(&self) -> Vec<String> {
        self.ata_ports
            .iter()
            .map(|p| format!("{}:0:0:0", p.saturating_sub(1)))
            .collect()
    }
}

/// Default wiring: slot *n* on port *n*.
pub static DEFAULT_ORDER: ModelProfile = ModelProfile {
    name: "default",
    ata_ports: &[1, 2, 3, 4, 5, 6, 7, 8],
};

// ── Known models ──

static DXP2800: ModelProfile = ModelProfile {
    name: "DXP2800",
    ata_ports: &[1, 2],
};

static DXP4800: ModelProfile = ModelProfile {
    name: "DXP4800",
    ata_ports: &[1, 2, 3, 4],
};

// Ports 3-6 sit in the left four bays, ports 1-2 in the right two.
static DXP6800: ModelProfile = ModelProfile {
    name: "DXP6800",
    ata_ports: &[3, 4, 5, 6, 1, 2],
};

static DXP8800: ModelProfile = ModelProfile {
    name: "DXP8800",
    ata_ports: &[1, 2, 3, 4, 5, 6, 7, 8],
};

static KNOWN_MODELS: [&ModelProfile; 4] = [&DXP2800, &DXP4800, &DXP6800, &DXP8800];

/// Detect the model profile from a DMI product name by prefix.
///
/// `"DXP4800 Plus"` and `"DXP4800"` resolve to the same profile.
pub fn detect_model(product_name: &str) -> Option<&'static ModelProfile> {
    let name = product_name.trim();
    KNOWN_MODELS
        .iter()
        .copied()
        .find(|m| name.starts_with(m.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── detect_model ──

    #[test]
    fn detect_dxp6800_by_prefix() {
        let profile = detect_model("DXP6800 Pro").unwrap();
        assert_eq!(profile.name, "DXP6800");
    }

    #[test]
    fn detect_plus_variants() {
        assert_eq!(detect_model("DXP4800 Plus").unwrap().name, "DXP4800");
        assert_eq!(detect_model("DXP8800 Plus").unwrap().name, "DXP8800");
        assert_eq!(detect_model("DXP2800").unwrap().name, "DXP2800");
    }

    #[test]
    fn detect_trims_whitespace() {
        assert!(detect_model("  DXP6800 Pro\n").is_some());
    }

    #[test]
    fn detect_unknown_model_returns_none() {
        assert!(detect_model("To Be Filled By O.E.M.").is_none());
        assert!(detect_model("dxp6800").is_none());
        assert!(detect_model("").is_none());
    }

    // ── Slot keys ──

    #[test]
    fn dxp6800_permutation() {
        let p = detect_model("DXP6800 Pro").unwrap();
        assert_eq!(
            p.ata_keys(),
            vec!["ata3", "ata4", "ata5", "ata6", "ata1", "ata2"]
        );
        assert_eq!(
            p.hctl_keys(),
            vec!["2:0:0:0", "3:0:0:0", "4:0:0:0", "5:0:0:0", "0:0:0:0", "1:0:0:0"]
        );
    }

    #[test]
    fn default_order_keys() {
        assert_eq!(DEFAULT_ORDER.ata_keys()[0], "ata1");
        assert_eq!(DEFAULT_ORDER.ata_keys()[7], "ata8");
        assert_eq!(DEFAULT_ORDER.hctl_keys()[0], "0:0:0:0");
        assert_eq!(DEFAULT_ORDER.hctl_keys()[7], "7:0:0:0");
    }

    #[test]
    fn non_permuted_models_follow_default_prefix() {
        for model in KNOWN_MODELS.iter().filter(|m| m.name != "DXP6800") {
            let n = model.ata_ports.len();
            assert_eq!(model.ata_keys(), DEFAULT_ORDER.ata_keys()[..n].to_vec());
        }
    }

    #[test]
    fn profiles_have_no_duplicate_ports() {
        for model in KNOWN_MODELS {
            let mut ports = model.ata_ports.to_vec();
            ports.sort_unstable();
            ports.dedup();
            assert_eq!(ports.len(), model.ata_ports.len(), "{}", model.name);
        }
    }

    #[test]
    fn profiles_fit_eight_slots() {
        for model in KNOWN_MODELS {
            assert!(!model.ata_ports.is_empty() && model.ata_ports.len() <= 8);
        }
    }
}
