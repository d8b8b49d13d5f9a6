//! Extraction of Marlin pin definitions from a C header.
//!
//! Two independent macro families are scanned:
//!
//! ```c
//! #define MARLIN_PORT_E0_STEP   MARLIN_PORT_D
//! #define MARLIN_PIN_NR_E0_STEP MARLIN_PIN_NR_9
//! ```
//!
//! Entries are keyed by the name following the family prefix and joined by
//! name. Only names that appear in both families yield a complete pin.

use crate::pin::{PinLabel, Port};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

lazy_static! {
    static ref PORT_DEFINE: Regex =
        Regex::new(r"#define MARLIN_PORT_(\w+)\s+MARLIN_PORT_([A-G])").unwrap();
    static ref PIN_NR_DEFINE: Regex =
        Regex::new(r"#define MARLIN_PIN_NR_(\w+)\s+MARLIN_PIN_NR_(\d+)").unwrap();
}

/// A Marlin pin name with both port and pin number resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarlinPin {
    pub name: String,
    pub pin: PinLabel,
}

/// A name seen in the port family, possibly still lacking a pin number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarlinEntry {
    pub name: String,
    pub port: Port,
    /// Pin number digits exactly as written in the macro.
    pub digits: Option<String>,
}

impl MarlinEntry {
    pub fn pin(&self) -> Option<PinLabel> {
        let digits = self.digits.as_deref()?;
        PinLabel::new(self.port, digits).ok()
    }
}

/// Merged view of both macro families, in first-seen order of the port family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinDefinitions {
    entries: Vec<MarlinEntry>,
}

impl PinDefinitions {
    /// Scan header text for both macro families and merge them by name.
    pub fn parse(content: &str) -> Self {
        let mut entries: Vec<MarlinEntry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for caps in PORT_DEFINE.captures_iter(content) {
            let name = &caps[1];
            let Some(Ok(port)) = caps[2].chars().next().map(Port::from_letter) else {
                continue;
            };
            match index.get(name) {
                Some(&i) => {
                    // Redefinition: keep position, replace the entry.
                    entries[i].port = port;
                    entries[i].digits = None;
                }
                None => {
                    index.insert(name.to_string(), entries.len());
                    entries.push(MarlinEntry { name: name.to_string(), port, digits: None });
                }
            }
        }

        let mut orphans = 0usize;
        for caps in PIN_NR_DEFINE.captures_iter(content) {
            let name = &caps[1];
            let Some(&i) = index.get(name) else {
                orphans += 1;
                tracing::trace!("MARLIN_PIN_NR_{} has no matching port definition", name);
                continue;
            };
            entries[i].digits = Some(caps[2].to_string());
        }

        let defs = Self { entries };
        tracing::debug!(
            "Parsed {} port definitions, {} complete, {} pin numbers without a port",
            defs.entries.len(),
            defs.complete().count(),
            orphans
        );
        let dropped: Vec<&str> = defs.incomplete().collect();
        if !dropped.is_empty() {
            tracing::debug!("Dropping Marlin pins without a pin number: {}", dropped.join(", "));
        }
        defs
    }

    pub fn entries(&self) -> &[MarlinEntry] {
        &self.entries
    }

    /// Entries with both port and pin number, in first-seen order.
    pub fn complete(&self) -> impl Iterator<Item = MarlinPin> + '_ {
        self.entries.iter().filter_map(|entry| {
            entry.pin().map(|pin| MarlinPin { name: entry.name.clone(), pin })
        })
    }

    /// Names defined with a port but never given a pin number.
    pub fn incomplete(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.digits.is_none())
            .map(|entry| entry.name.as_str())
    }
}
