//! Pin identity and key utilities
//!
//! A pin is addressed by its port and its bit index within that port. The
//! registry stores identities in a flat array and compares them directly;
//! the packed [`PinId::key`] form is kept for diagnostics and for boards
//! that index their own tables by a single integer.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::ClockDomain;

/// Pins per GPIO port
pub const PINS_PER_PORT: u8 = 16;

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
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
    /// All ports in index order
    pub const ALL: [Port; 7] = [
        Port::A,
        Port::B,
        Port::C,
        Port::D,
        Port::E,
        Port::F,
        Port::G,
    ];

    /// Zero-based port index (A = 0)
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Port for a zero-based index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Port for a letter (`'A'`..=`'G'`, either case)
    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return None;
        }
        Self::from_index(letter as u8 - b'A')
    }

    /// Port letter
    pub fn letter(self) -> char {
        (b'A' + self.index()) as char
    }

    /// Clock domain gating this port
    pub fn clock_domain(self) -> ClockDomain {
        match self {
            Port::A => ClockDomain::GpioA,
            Port::B => ClockDomain::GpioB,
            Port::C => ClockDomain::GpioC,
            Port::D => ClockDomain::GpioD,
            Port::E => ClockDomain::GpioE,
            Port::F => ClockDomain::GpioF,
            Port::G => ClockDomain::GpioG,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.letter())
    }
}

/// Unique identity of a managed pin: `(port, pin number)`
///
/// Construction is unchecked so identities can appear in `const` pin tables;
/// [`PinId::is_valid`] is enforced when a pin is added to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinId {
    port: Port,
    number: u8,
}

impl PinId {
    /// Create an identity from a port and a bit index (0-15)
    pub const fn new(port: Port, number: u8) -> Self {
        Self { port, number }
    }

    /// Create an identity from a vendor pin mask (exactly one bit set)
    pub fn from_mask(port: Port, mask: u16) -> Option<Self> {
        if mask.count_ones() != 1 {
            return None;
        }
        Some(Self::new(port, mask.trailing_zeros() as u8))
    }

    /// Rebuild an identity from its packed key
    pub fn from_key(key: u32) -> Option<Self> {
        let index = u8::try_from(key >> 16).ok()?;
        Self::from_mask(Port::from_index(index)?, key as u16)
    }

    /// Parse a pin string such as `"PA0"` or `"!PB12"`
    ///
    /// Returns the identity and whether the pin is marked inverted
    /// (active-low) with a leading `!`.
    pub fn parse(s: &str) -> Option<(Self, bool)> {
        let s = s.trim();
        let (s, inverted) = match s.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let mut chars = s.chars();
        if !matches!(chars.next(), Some('P') | Some('p')) {
            return None;
        }
        let port = Port::from_letter(chars.next()?)?;

        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: u8 = digits.parse().ok()?;
        let id = Self::new(port, number);
        id.is_valid().then_some((id, inverted))
    }

    /// Port of this pin
    pub const fn port(&self) -> Port {
        self.port
    }

    /// Bit index within the port
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Check the pin number addresses a real line
    pub const fn is_valid(&self) -> bool {
        self.number < PINS_PER_PORT
    }

    /// Vendor single-bit mask for this pin (0 for an invalid number)
    pub fn mask(&self) -> u16 {
        if self.is_valid() {
            1 << self.number
        } else {
            0
        }
    }

    /// Packed key: port index in the high half, pin mask in the low half
    pub fn key(&self) -> u32 {
        ((self.port.index() as u32) << 16) | self.mask() as u32
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.port, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_port_letters() {
        assert_eq!(Port::from_letter('a'), Some(Port::A));
        assert_eq!(Port::from_letter('G'), Some(Port::G));
        assert_eq!(Port::from_letter('H'), None);
        assert_eq!(Port::from_letter('1'), None);
        assert_eq!(Port::C.letter(), 'C');
        assert_eq!(Port::from_index(7), None);
    }

    #[test]
    fn test_validity() {
        assert!(PinId::new(Port::A, 0).is_valid());
        assert!(PinId::new(Port::A, 15).is_valid());
        assert!(!PinId::new(Port::A, 16).is_valid());
        assert_eq!(PinId::new(Port::A, 16).mask(), 0);
    }

    #[test]
    fn test_mask() {
        assert_eq!(PinId::from_mask(Port::B, 0x0001), Some(PinId::new(Port::B, 0)));
        assert_eq!(PinId::from_mask(Port::B, 0x8000), Some(PinId::new(Port::B, 15)));
        assert_eq!(PinId::from_mask(Port::B, 0), None);
        assert_eq!(PinId::from_mask(Port::B, 0x0003), None);
        assert_eq!(PinId::new(Port::C, 13).mask(), 0x2000);
    }

    #[test]
    fn test_key_layout() {
        let id = PinId::new(Port::C, 13);
        assert_eq!(id.key(), 0x0002_2000);
        assert_eq!(PinId::from_key(0x0002_2000), Some(id));
        assert_eq!(PinId::from_key(0x0007_0001), None);
        assert_eq!(PinId::from_key(0x0000_0000), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            PinId::parse("PA0"),
            Some((PinId::new(Port::A, 0), false))
        );
        assert_eq!(
            PinId::parse(" !PB12 "),
            Some((PinId::new(Port::B, 12), true))
        );
        assert_eq!(PinId::parse("pc13"), Some((PinId::new(Port::C, 13), false)));
        assert_eq!(PinId::parse("PA16"), None);
        assert_eq!(PinId::parse("PH1"), None);
        assert_eq!(PinId::parse("PA"), None);
        assert_eq!(PinId::parse("PA+1"), None);
        assert_eq!(PinId::parse("A1"), None);
        assert_eq!(PinId::parse(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PinId::new(Port::A, 9).to_string(), "PA9");
        assert_eq!(Port::G.to_string(), "PG");
    }

    proptest! {
        #[test]
        fn prop_key_roundtrip(port in 0u8..7, number in 0u8..16) {
            let id = PinId::new(Port::from_index(port).unwrap(), number);
            prop_assert_eq!(PinId::from_key(id.key()), Some(id));
            prop_assert_eq!(PinId::parse(&id.to_string()), Some((id, false)));
        }
    }
}
