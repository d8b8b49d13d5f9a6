//! Free-pin analysis for STM32F407 printer boards.
//!
//! Parses the Marlin pin macros out of a C header, merges them with the
//! board's extra wiring, and reports which GPIO pins remain free, which of
//! those are worth recommending, and which can serve as ADC inputs.

pub mod adc;
pub mod analysis;
pub mod config;
pub mod error;
pub mod pin;
pub mod pindef;
pub mod report;

pub use analysis::PinAnalysis;
pub use config::{Config, load_config};
pub use error::AnalysisError;
pub use pin::{PinId, PinLabel, Port};
pub use pindef::{MarlinPin, PinDefinitions};
