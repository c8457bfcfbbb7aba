use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::{BankId, Paymode};

/// Errors raised when constructing a bank
#[derive(Debug, Error, PartialEq)]
pub enum BankError {
    #[error("bank {0}: success rate {1} is outside [0.0, 1.0]")]
    InvalidSuccessRate(BankId, f64),
}

/// A settlement provider and the payment modes it services.
///
/// The success rate is advisory: it is reported by the registry distribution
/// but never consulted when routing.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    id: BankId,
    success_rate: f64,
    supported_paymodes: HashSet<Paymode>,
}

impl Bank {
    /// Create a bank with no supported modes. The success rate is stored as given.
    pub fn new(name: impl Into<BankId>, success_rate: f64) -> Self {
        Self {
            id: name.into(),
            success_rate,
            supported_paymodes: HashSet::new(),
        }
    }

    /// Like [`Bank::new`] but rejects success rates outside `[0.0, 1.0]`.
    pub fn try_new(name: impl Into<BankId>, success_rate: f64) -> Result<Self, BankError> {
        let id = name.into();
        if !(0.0..=1.0).contains(&success_rate) {
            return Err(BankError::InvalidSuccessRate(id, success_rate));
        }
        Ok(Self::new(id, success_rate))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    pub fn supported_paymodes(&self) -> &HashSet<Paymode> {
        &self.supported_paymodes
    }

    pub fn supports(&self, paymode: &str) -> bool {
        self.supported_paymodes.contains(paymode)
    }

    pub fn add_supported_paymode(&mut self, paymode: impl Into<Paymode>) {
        self.supported_paymodes.insert(paymode.into());
    }

    pub fn remove_supported_paymode(&mut self, paymode: &str) {
        self.supported_paymodes.remove(paymode);
    }

    /// Builder form of [`Bank::add_supported_paymode`].
    pub fn with_paymode(mut self, paymode: impl Into<Paymode>) -> Self {
        self.add_supported_paymode(paymode);
        self
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.id, self.success_rate)
    }
}
