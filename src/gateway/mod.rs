//! Payment gateway.
//!
//! The gateway owns a [`Registry`] of clients and banks, and a [`Dispatcher`]
//! that routes payments against it. Dispatch is synchronous and single shot;
//! [`PaymentGateway::run`] only adapts an async stream of requests and still
//! handles them one at a time.

use indexmap::IndexMap;
use std::collections::HashSet;
use tokio_stream::{Stream, StreamExt};

use crate::bank::Bank;
use crate::model::{BankId, PaymentDetails, PaymentOutcome, PaymentRequest, Paymode};
use crate::settlement::{MockSettlement, Settlement};

mod registry;
pub use registry::Registry;

mod dispatch;
pub use dispatch::{Dispatcher, Settled};

mod error;
pub use error::PaymentError;

/// Registry and dispatcher bundled behind a single API.
#[derive(Debug, Clone, Default)]
pub struct PaymentGateway<S = MockSettlement> {
    registry: Registry,
    dispatcher: Dispatcher<S>,
}

impl PaymentGateway<MockSettlement> {
    pub fn new() -> Self {
        Self::with_settlement(MockSettlement::new())
    }
}

impl<S: Settlement> PaymentGateway<S> {
    pub fn with_settlement(settlement: S) -> Self {
        Self {
            registry: Registry::new(),
            dispatcher: Dispatcher::with_settlement(settlement),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn add_client(&mut self, client: &str) {
        self.registry.add_client(client);
    }

    pub fn remove_client(&mut self, client: &str) {
        self.registry.remove_client(client);
    }

    pub fn has_client(&self, client: &str) -> bool {
        self.registry.has_client(client)
    }

    pub fn list_supported_paymodes(&self, client: Option<&str>) -> HashSet<Paymode> {
        self.registry.list_supported_paymodes(client)
    }

    pub fn add_support_for_paymode(&mut self, client: &str, paymode: &str) {
        self.registry.add_support_for_paymode(client, paymode);
    }

    pub fn remove_paymode(&mut self, paymode: &str) {
        self.registry.remove_paymode(paymode);
    }

    pub fn add_bank(&mut self, bank: Bank) -> Option<Bank> {
        self.registry.add_bank(bank)
    }

    pub fn remove_bank(&mut self, bank: &str) -> Option<Bank> {
        self.registry.remove_bank(bank)
    }

    pub fn bank_mut(&mut self, bank: &str) -> Option<&mut Bank> {
        self.registry.bank_mut(bank)
    }

    pub fn show_distribution(&self) -> IndexMap<BankId, f64> {
        self.registry.show_distribution()
    }

    /// See [`Dispatcher::make_payment`].
    pub fn make_payment(&mut self, client: &str, paymode: &str, details: &PaymentDetails) -> bool {
        self.dispatcher.make_payment(&self.registry, client, paymode, details)
    }

    /// See [`Dispatcher::dispatch`].
    pub fn dispatch(
        &mut self,
        client: &str,
        paymode: &str,
        details: &PaymentDetails,
    ) -> Result<Settled, PaymentError> {
        self.dispatcher.dispatch(&self.registry, client, paymode, details)
    }

    /// Dispatch a request and describe what happened.
    pub fn submit(&mut self, request: &PaymentRequest) -> PaymentOutcome {
        let result = self.dispatch(&request.client, &request.paymode, &request.details);
        let (bank, success) = match result {
            Ok(settled) => (Some(settled.bank), true),
            Err(e) => (e.bank().cloned(), false),
        };
        PaymentOutcome {
            client: request.client.clone(),
            paymode: request.paymode.clone(),
            bank,
            success,
        }
    }

    /// Dispatch every request of the stream, in order.
    pub async fn run(
        &mut self,
        mut stream: impl Stream<Item = PaymentRequest> + Unpin,
    ) -> Vec<PaymentOutcome> {
        let mut outcomes = Vec::new();
        while let Some(request) = stream.next().await {
            outcomes.push(self.submit(&request));
        }
        outcomes
    }
}
