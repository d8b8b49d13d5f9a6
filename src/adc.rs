//! STM32F407 ADC channel mapping.

use crate::pin::{PinId, Port};
use std::fmt;

/// One contiguous run of ADC-capable pins on a port.
#[derive(Debug, Clone, Copy)]
struct AdcRange {
    port: Port,
    first: u32,
    last: u32,
    adcs: &'static str,
    channel_offset: u32,
}

const ADC_TABLE: [AdcRange; 3] = [
    AdcRange { port: Port::A, first: 0, last: 7, adcs: "ADC123", channel_offset: 0 },
    AdcRange { port: Port::B, first: 0, last: 1, adcs: "ADC12", channel_offset: 8 },
    AdcRange { port: Port::C, first: 0, last: 5, adcs: "ADC123", channel_offset: 10 },
];

/// ADC channel label such as `ADC123_IN2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcChannel {
    pub adcs: &'static str,
    pub channel: u32,
}

impl fmt::Display for AdcChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_IN{}", self.adcs, self.channel)
    }
}

/// ADC input associated with `pin`, if any.
pub fn channel_for(pin: PinId) -> Option<AdcChannel> {
    ADC_TABLE
        .iter()
        .find(|r| r.port == pin.port && (r.first..=r.last).contains(&pin.number))
        .map(|r| AdcChannel { adcs: r.adcs, channel: pin.number + r.channel_offset })
}
