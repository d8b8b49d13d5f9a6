//! Used/free pin analysis.
//!
//! Builds the used-pin set from Marlin definitions plus board and common pins,
//! takes its complement over the 112-pin address space, then filters reserved
//! pins and tags ADC inputs among what remains.

use crate::adc::{self, AdcChannel};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::pin::{PinId, PinLabel, Port};
use crate::pindef::{MarlinPin, PinDefinitions};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonPin {
    pub pin: PinLabel,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcPin {
    pub pin: PinId,
    pub channel: AdcChannel,
}

/// Result of one analysis run.
///
/// `used` holds pins as written, so `A011` or `G16` count as used without
/// touching the 0-15 address space that `free` is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinAnalysis {
    pub marlin_pins: Vec<MarlinPin>,
    pub common_pins: Vec<CommonPin>,
    pub used: BTreeSet<PinLabel>,
    pub free: Vec<PinId>,
    pub recommended: Vec<PinId>,
    pub adc: Vec<AdcPin>,
}

impl PinAnalysis {
    pub fn new(defs: &PinDefinitions, config: &Config) -> Self {
        let marlin_pins: Vec<MarlinPin> = defs.complete().collect();
        let common_pins: Vec<CommonPin> = config
            .common_pins
            .iter()
            .filter_map(|c| match c.pin.parse::<PinLabel>() {
                Ok(pin) => Some(CommonPin { pin, name: c.name.clone() }),
                Err(e) => {
                    tracing::warn!("Skipping common_pins entry '{}': {}", c.pin, e);
                    None
                }
            })
            .collect();

        let mut used = BTreeSet::new();
        used.extend(marlin_pins.iter().map(|m| m.pin.clone()));
        used.extend(config.board_pin_labels());
        used.extend(common_pins.iter().map(|c| c.pin.clone()));

        let free: Vec<PinId> =
            PinId::all().filter(|&pin| !used.contains(&PinLabel::from(pin))).collect();

        let reserved: HashSet<PinId> = config.reserved_pin_ids().into_iter().collect();
        let recommended: Vec<PinId> =
            free.iter().copied().filter(|pin| !reserved.contains(pin)).collect();

        let adc = recommended
            .iter()
            .filter_map(|&pin| adc::channel_for(pin).map(|channel| AdcPin { pin, channel }))
            .collect();

        let analysis = Self { marlin_pins, common_pins, used, free, recommended, adc };
        tracing::info!(
            "{} Marlin pins, {} used, {} free, {} recommended, {} ADC-capable",
            analysis.marlin_pins.len(),
            analysis.used.len(),
            analysis.free.len(),
            analysis.recommended.len(),
            analysis.adc.len()
        );
        analysis
    }

    pub fn from_header(content: &str, config: &Config) -> Self {
        Self::new(&PinDefinitions::parse(content), config)
    }

    /// Read the header at `path` and analyse it.
    pub fn from_file(path: impl AsRef<Path>, config: &Config) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        tracing::info!("Reading pin header: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Header {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_header(&content, config))
    }

    pub fn free_by_port(&self) -> Vec<(Port, Vec<u32>)> {
        group_by_port(&self.free)
    }

    pub fn recommended_by_port(&self) -> Vec<(Port, Vec<u32>)> {
        group_by_port(&self.recommended)
    }
}

/// Sorted pin numbers per port, skipping ports with no pins.
pub fn group_by_port(pins: &[PinId]) -> Vec<(Port, Vec<u32>)> {
    Port::ALL
        .into_iter()
        .filter_map(|port| {
            let mut numbers: Vec<u32> =
                pins.iter().filter(|p| p.port == port).map(|p| p.number).collect();
            if numbers.is_empty() {
                return None;
            }
            numbers.sort_unstable();
            Some((port, numbers))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(s: &str) -> PinId {
        s.parse().unwrap()
    }

    fn bare_config() -> Config {
        Config {
            board_pins: vec![],
            common_pins: vec![],
            reserved_pins: vec![],
            ..Config::default()
        }
    }

    #[test]
    fn test_nothing_used() {
        let analysis = PinAnalysis::from_header("", &bare_config());
        assert!(analysis.used.is_empty());
        assert_eq!(analysis.free.len(), 112);
        assert_eq!(analysis.recommended, analysis.free);
        // A0-7, B0-1, C0-5
        assert_eq!(analysis.adc.len(), 16);
    }

    #[test]
    fn test_reserved_only_filters_free_pins() {
        let config = Config {
            board_pins: vec!["A0".into()],
            reserved_pins: vec!["A0".into(), "A1".into()],
            ..bare_config()
        };
        let analysis = PinAnalysis::from_header("", &config);
        assert!(!analysis.free.contains(&pin("A0")));
        assert!(analysis.free.contains(&pin("A1")));
        assert!(!analysis.recommended.contains(&pin("A1")));
        assert_eq!(analysis.free.len() - analysis.recommended.len(), 1);
    }

    #[test]
    fn test_out_of_range_marlin_pin_counts_as_used_only() {
        let header = "#define MARLIN_PORT_X MARLIN_PORT_A\n#define MARLIN_PIN_NR_X MARLIN_PIN_NR_20\n";
        let analysis = PinAnalysis::from_header(header, &bare_config());
        assert_eq!(analysis.used.len(), 1);
        assert_eq!(analysis.free.len(), 112);
    }

    #[test]
    fn test_zero_padded_marlin_pin_does_not_claim_plain_pin() {
        let header = "#define MARLIN_PORT_X MARLIN_PORT_A\n#define MARLIN_PIN_NR_X MARLIN_PIN_NR_011\n";
        let analysis = PinAnalysis::from_header(header, &bare_config());
        assert_eq!(analysis.used.len(), 1);
        assert!(analysis.free.contains(&pin("A11")));
    }

    #[test]
    fn test_group_by_port_sorts_and_skips_empty() {
        let pins = vec![pin("C9"), pin("A3"), pin("C2"), pin("A1")];
        assert_eq!(
            group_by_port(&pins),
            vec![(Port::A, vec![1, 3]), (Port::C, vec![2, 9])]
        );
    }
}
