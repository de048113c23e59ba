//! Clock-domain bookkeeping
//!
//! Every GPIO port and every peripheral controller sits behind a clock gate
//! that must be opened before the device responds. The table keeps one
//! entry per gate and reference-counts the claims made on it, so the gate is
//! opened by the first claim and closed only when the last claim is dropped.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::ClockGate;

/// Clock-gated hardware domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ClockDomain {
    GpioA,
    GpioB,
    GpioC,
    GpioD,
    GpioE,
    GpioF,
    GpioG,
    Tim1,
    Tim2,
    Tim3,
    Tim4,
    Usart1,
    Usart2,
    Usart3,
    Spi1,
    Spi2,
    I2c1,
    I2c2,
    Dma1,
    Dma2,
    Adc1,
    Adc2,
}

impl ClockDomain {
    /// Number of domains
    pub const COUNT: usize = 22;

    /// Table index of this domain
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Error releasing a clock domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The domain has no outstanding claims
    NotClaimed,
}

/// State of one clock domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDomainEntry {
    /// Gate is open
    pub enabled: bool,
    /// Outstanding claims
    pub claims: u16,
}

/// Reference-counted clock-domain table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDomainTable {
    entries: [ClockDomainEntry; ClockDomain::COUNT],
}

impl Default for ClockDomainTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockDomainTable {
    /// Create a table with every domain gated off
    pub const fn new() -> Self {
        Self {
            entries: [ClockDomainEntry {
                enabled: false,
                claims: 0,
            }; ClockDomain::COUNT],
        }
    }

    /// Claim a domain, opening its gate on the first claim
    ///
    /// Returns `true` if this call enabled the domain.
    pub fn claim<G: ClockGate + ?Sized>(&mut self, domain: ClockDomain, gate: &mut G) -> bool {
        let entry = &mut self.entries[domain.index()];
        entry.claims = entry.claims.saturating_add(1);
        if entry.enabled {
            return false;
        }
        gate.enable(domain);
        entry.enabled = true;
        true
    }

    /// Drop one claim, closing the gate when none remain
    ///
    /// Returns `Ok(true)` if this call disabled the domain.
    pub fn release<G: ClockGate + ?Sized>(
        &mut self,
        domain: ClockDomain,
        gate: &mut G,
    ) -> Result<bool, ClockError> {
        let entry = &mut self.entries[domain.index()];
        if entry.claims == 0 {
            return Err(ClockError::NotClaimed);
        }
        entry.claims -= 1;
        if entry.claims > 0 || !entry.enabled {
            return Ok(false);
        }
        gate.disable(domain);
        entry.enabled = false;
        Ok(true)
    }

    /// Current state of a domain
    pub fn entry(&self, domain: ClockDomain) -> ClockDomainEntry {
        self.entries[domain.index()]
    }

    /// Check whether a domain's gate is open
    pub fn is_enabled(&self, domain: ClockDomain) -> bool {
        self.entry(domain).enabled
    }

    /// Outstanding claims on a domain
    pub fn claim_count(&self, domain: ClockDomain) -> u16 {
        self.entry(domain).claims
    }

    /// Number of open gates
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBoard;

    #[test]
    fn test_last_domain_index() {
        assert_eq!(ClockDomain::Adc2.index(), ClockDomain::COUNT - 1);
    }

    #[test]
    fn test_single_enable() {
        let mut table = ClockDomainTable::new();
        let mut gate = MockBoard::new();

        assert!(table.claim(ClockDomain::GpioA, &mut gate));
        for _ in 0..4 {
            assert!(!table.claim(ClockDomain::GpioA, &mut gate));
        }

        assert_eq!(gate.enables_of(ClockDomain::GpioA), 1);
        assert_eq!(table.claim_count(ClockDomain::GpioA), 5);
        assert!(table.is_enabled(ClockDomain::GpioA));
        assert!(!table.is_enabled(ClockDomain::GpioB));
        assert_eq!(table.enabled_count(), 1);
    }

    #[test]
    fn test_release_disables_on_last_claim() {
        let mut table = ClockDomainTable::new();
        let mut gate = MockBoard::new();

        table.claim(ClockDomain::Tim2, &mut gate);
        table.claim(ClockDomain::Tim2, &mut gate);

        assert_eq!(table.release(ClockDomain::Tim2, &mut gate), Ok(false));
        assert!(table.is_enabled(ClockDomain::Tim2));
        assert_eq!(gate.disables_of(ClockDomain::Tim2), 0);

        assert_eq!(table.release(ClockDomain::Tim2, &mut gate), Ok(true));
        assert!(!table.is_enabled(ClockDomain::Tim2));
        assert_eq!(gate.disables_of(ClockDomain::Tim2), 1);
    }

    #[test]
    fn test_release_unclaimed() {
        let mut table = ClockDomainTable::new();
        let mut gate = MockBoard::new();

        assert_eq!(
            table.release(ClockDomain::Usart1, &mut gate),
            Err(ClockError::NotClaimed)
        );
        assert_eq!(gate.disables_of(ClockDomain::Usart1), 0);
        assert_eq!(table.entry(ClockDomain::Usart1), ClockDomainEntry::default());
    }

    #[test]
    fn test_reclaim_after_release() {
        let mut table = ClockDomainTable::new();
        let mut gate = MockBoard::new();

        table.claim(ClockDomain::Spi1, &mut gate);
        let _ = table.release(ClockDomain::Spi1, &mut gate);
        assert!(table.claim(ClockDomain::Spi1, &mut gate));
        assert_eq!(gate.enables_of(ClockDomain::Spi1), 2);
    }
}
