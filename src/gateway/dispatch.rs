use tracing::info;

use super::error::PaymentError;
use super::registry::Registry;
use crate::model::{BankId, PaymentDetails};
use crate::settlement::{MockSettlement, Settlement};

/// A payment settled successfully with `bank`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub bank: BankId,
}

/// Routes a payment to a bank and asks the settlement step for an outcome.
///
/// The dispatcher holds no registry state of its own; every call borrows the
/// registry it should route against.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<S = MockSettlement> {
    settlement: S,
}

impl Dispatcher<MockSettlement> {
    pub fn new() -> Self {
        Self::with_settlement(MockSettlement::new())
    }
}

/// Public API
impl<S: Settlement> Dispatcher<S> {
    pub fn with_settlement(settlement: S) -> Self {
        Self { settlement }
    }

    pub fn settlement_mut(&mut self) -> &mut S {
        &mut self.settlement
    }

    /// Dispatch a payment, returning `true` only when it was settled.
    ///
    /// Unknown client, unsupported mode, no bank and a declined settlement all
    /// give `false`.
    pub fn make_payment(
        &mut self,
        registry: &Registry,
        client: &str,
        paymode: &str,
        details: &PaymentDetails,
    ) -> bool {
        self.dispatch(registry, client, paymode, details).is_ok()
    }

    /// Dispatch a payment:
    /// - Ensure the client is registered and supports the mode
    /// - Select the first registered bank supporting the mode
    /// - Settle with that bank
    pub fn dispatch(
        &mut self,
        registry: &Registry,
        client: &str,
        paymode: &str,
        details: &PaymentDetails,
    ) -> Result<Settled, PaymentError> {
        let result = self.try_dispatch(registry, client, paymode, details);
        Self::log_result(client, paymode, &result);
        result
    }
}

/// Private API
impl<S: Settlement> Dispatcher<S> {
    fn try_dispatch(
        &mut self,
        registry: &Registry,
        client: &str,
        paymode: &str,
        details: &PaymentDetails,
    ) -> Result<Settled, PaymentError> {
        if !registry.has_client(client) {
            return Err(PaymentError::UnknownClient(client.to_string()));
        }
        if !registry.client_supports(client, paymode) {
            return Err(PaymentError::UnsupportedPaymode(
                client.to_string(),
                paymode.to_string(),
            ));
        }

        let bank = registry
            .bank_for_paymode(paymode)
            .ok_or_else(|| PaymentError::NoBankForPaymode(paymode.to_string()))?;

        if self.settlement.settle(bank, details) {
            Ok(Settled {
                bank: bank.id().to_string(),
            })
        } else {
            Err(PaymentError::Declined {
                bank: bank.id().to_string(),
            })
        }
    }

    fn log_result(client: &str, paymode: &str, result: &Result<Settled, PaymentError>) {
        match result {
            Ok(settled) => {
                info!(
                    client = %client,
                    paymode = %paymode,
                    bank = %settled.bank,
                    "payment settled"
                );
            }
            Err(e) => {
                info!(
                    client = %client,
                    paymode = %paymode,
                    reason = %e,
                    "payment failed"
                );
            }
        }
    }
}
