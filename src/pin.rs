//! Port and pin identifier types for the STM32F407 GPIO address space.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of pins on every GPIO port.
pub const PINS_PER_PORT: u32 = 16;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PinParseError {
    #[error("empty pin identifier")]
    Empty,
    #[error("unknown port '{0}'")]
    UnknownPort(char),
    #[error("invalid pin number in '{0}'")]
    InvalidNumber(String),
}

/// GPIO port letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Port {
    pub const ALL: [Port; 7] = [Port::A, Port::B, Port::C, Port::D, Port::E, Port::F, Port::G];

    pub fn from_letter(c: char) -> Result<Self, PinParseError> {
        match c {
            'A' => Ok(Port::A),
            'B' => Ok(Port::B),
            'C' => Ok(Port::C),
            'D' => Ok(Port::D),
            'E' => Ok(Port::E),
            'F' => Ok(Port::F),
            'G' => Ok(Port::G),
            other => Err(PinParseError::UnknownPort(other)),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
            Port::D => 'D',
            Port::E => 'E',
            Port::F => 'F',
            Port::G => 'G',
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A port letter plus pin number, e.g. `E11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId {
    pub port: Port,
    pub number: u32,
}

impl PinId {
    pub fn new(port: Port, number: u32) -> Self {
        Self { port, number }
    }

    /// Every identifier in the address space, port-major.
    pub fn all() -> impl Iterator<Item = PinId> {
        Port::ALL
            .into_iter()
            .flat_map(|port| (0..PINS_PER_PORT).map(move |number| PinId::new(port, number)))
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.port, self.number)
    }
}

impl FromStr for PinId {
    type Err = PinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(PinParseError::Empty)?;
        let port = Port::from_letter(letter)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinParseError::InvalidNumber(s.to_string()));
        }
        let number = digits
            .parse()
            .map_err(|_| PinParseError::InvalidNumber(s.to_string()))?;
        Ok(PinId { port, number })
    }
}

impl Serialize for PinId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A pin as written in a header or board list: port letter plus the digits
/// exactly as they appear. `A011` and `A11` are different labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinLabel {
    pub port: Port,
    digits: String,
}

impl PinLabel {
    /// `digits` must be a non-empty run of decimal digits.
    pub fn new(port: Port, digits: &str) -> Result<Self, PinParseError> {
        if digits.is_empty() || !digits.chars().all(char::is_numeric) {
            return Err(PinParseError::InvalidNumber(format!("{}{}", port, digits)));
        }
        Ok(Self { port, digits: digits.to_string() })
    }

    fn significant_digits(&self) -> &str {
        self.digits.trim_start_matches('0')
    }
}

impl From<PinId> for PinLabel {
    fn from(pin: PinId) -> Self {
        Self { port: pin.port, digits: pin.number.to_string() }
    }
}

impl Ord for PinLabel {
    // Numeric order within a port; raw digits break ties between `A011` and `A11`.
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant_digits(), other.significant_digits());
        self.port
            .cmp(&other.port)
            .then(a.chars().count().cmp(&b.chars().count()))
            .then_with(|| a.cmp(b))
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for PinLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.port, self.digits)
    }
}

impl FromStr for PinLabel {
    type Err = PinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(PinParseError::Empty)?;
        let port = Port::from_letter(letter)?;
        PinLabel::new(port, chars.as_str())
    }
}

impl Serialize for PinLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let pin: PinId = "E11".parse().unwrap();
        assert_eq!(pin, PinId::new(Port::E, 11));
        assert_eq!(pin.to_string(), "E11");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!("".parse::<PinId>(), Err(PinParseError::Empty));
        assert_eq!("H3".parse::<PinId>(), Err(PinParseError::UnknownPort('H')));
        assert!(matches!("A".parse::<PinId>(), Err(PinParseError::InvalidNumber(_))));
        assert!(matches!("A-1".parse::<PinId>(), Err(PinParseError::InvalidNumber(_))));
        assert!(matches!("PA1".parse::<PinId>(), Err(PinParseError::UnknownPort('P'))));
    }

    #[test]
    fn test_address_space() {
        let all: Vec<PinId> = PinId::all().collect();
        assert_eq!(all.len(), 112);
        assert_eq!(all[0].to_string(), "A0");
        assert_eq!(all[16].to_string(), "B0");
        assert_eq!(all[111].to_string(), "G15");
        assert!(all.iter().all(|p| p.number < PINS_PER_PORT));
    }

    #[test]
    fn test_label_keeps_digits_as_written() {
        let padded: PinLabel = "A011".parse().unwrap();
        let plain: PinLabel = "A11".parse().unwrap();
        assert_ne!(padded, plain);
        assert_eq!(padded.to_string(), "A011");
        assert_eq!(PinLabel::from(PinId::new(Port::A, 11)), plain);
        let big: PinLabel = "B99999999999".parse().unwrap();
        assert_eq!(big.digits, "99999999999");
        assert!(matches!("C".parse::<PinLabel>(), Err(PinParseError::InvalidNumber(_))));
    }

    #[test]
    fn test_label_ordering_is_numeric() {
        let mut labels: Vec<PinLabel> =
            ["B0", "A10", "A011", "A2", "A11"].iter().map(|s| s.parse().unwrap()).collect();
        labels.sort();
        let text: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        assert_eq!(text, vec!["A2", "A10", "A011", "A11", "B0"]);
    }

    #[test]
    fn test_ordering_is_port_major() {
        assert!(PinId::new(Port::A, 15) < PinId::new(Port::B, 0));
        assert!(PinId::new(Port::C, 2) < PinId::new(Port::C, 10));
    }
}
