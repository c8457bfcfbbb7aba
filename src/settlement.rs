//! Settlement step invoked once a bank has been selected.
//!
//! No real bank protocol is spoken here. [`MockSettlement`] flips a fair coin,
//! ignoring both the bank's configured success rate and the payment details.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bank::Bank;
use crate::model::PaymentDetails;

/// Something that can settle a payment with a bank and report the outcome.
pub trait Settlement {
    fn settle(&mut self, bank: &Bank, details: &PaymentDetails) -> bool;
}

impl<F> Settlement for F
where
    F: FnMut(&Bank, &PaymentDetails) -> bool,
{
    fn settle(&mut self, bank: &Bank, details: &PaymentDetails) -> bool {
        self(bank, details)
    }
}

/// Uniformly random settlement.
#[derive(Debug, Clone)]
pub struct MockSettlement {
    rng: StdRng,
}

impl MockSettlement {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence of outcomes for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for MockSettlement {
    fn default() -> Self {
        Self::new()
    }
}

impl Settlement for MockSettlement {
    fn settle(&mut self, _bank: &Bank, _details: &PaymentDetails) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Settlement that approves every payment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApprove;

impl Settlement for AlwaysApprove {
    fn settle(&mut self, _bank: &Bank, _details: &PaymentDetails) -> bool {
        true
    }
}

/// Settlement that declines every payment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

impl Settlement for AlwaysDecline {
    fn settle(&mut self, _bank: &Bank, _details: &PaymentDetails) -> bool {
        false
    }
}
