use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::bank::Bank;
use crate::model::{BankId, ClientId, Paymode};

/// Clients with their supported payment modes, and the banks available for routing.
///
/// Banks keep their registration order: routing picks the first bank that
/// supports a mode.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    clients: HashMap<ClientId, HashSet<Paymode>>,
    banks: IndexMap<BankId, Bank>,
}

/// Clients
impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client with no supported modes.
    /// Re-adding an existing client clears its modes.
    pub fn add_client(&mut self, client: impl Into<ClientId>) {
        let client = client.into();
        debug!(client = %client, "client added");
        self.clients.insert(client, HashSet::new());
    }

    /// Remove a client, no-op when unknown
    pub fn remove_client(&mut self, client: &str) {
        if self.clients.remove(client).is_some() {
            debug!(client = %client, "client removed");
        }
    }

    pub fn has_client(&self, client: &str) -> bool {
        self.clients.contains_key(client)
    }

    /// Supported modes of one client (empty if unknown), or with `None` the
    /// union of every client's modes.
    pub fn list_supported_paymodes(&self, client: Option<&str>) -> HashSet<Paymode> {
        match client {
            Some(client) => self.clients.get(client).cloned().unwrap_or_default(),
            None => self.clients.values().flatten().cloned().collect(),
        }
    }

    /// Add a supported mode to a client, registering the client first if needed.
    pub fn add_support_for_paymode(
        &mut self,
        client: impl Into<ClientId>,
        paymode: impl Into<Paymode>,
    ) {
        let client = client.into();
        let paymode = paymode.into();
        debug!(client = %client, paymode = %paymode, "paymode support added");
        self.clients.entry(client).or_default().insert(paymode);
    }

    /// Drop a mode from every client. Bank support sets are left untouched.
    pub fn remove_paymode(&mut self, paymode: &str) {
        for modes in self.clients.values_mut() {
            modes.remove(paymode);
        }
        debug!(paymode = %paymode, "paymode removed from all clients");
    }

    /// Whether `client` is registered and supports `paymode`.
    pub fn client_supports(&self, client: &str, paymode: &str) -> bool {
        self.clients
            .get(client)
            .is_some_and(|modes| modes.contains(paymode))
    }

    pub fn clients(&self) -> impl Iterator<Item = (&ClientId, &HashSet<Paymode>)> + '_ {
        self.clients.iter()
    }
}

/// Banks
impl Registry {
    /// Register a bank under its id. A bank with the same id is replaced in place,
    /// keeping its routing position, and returned.
    pub fn add_bank(&mut self, bank: Bank) -> Option<Bank> {
        let id = bank.id().to_string();
        debug!(bank = %id, success_rate = bank.success_rate(), "bank added");
        let replaced = self.banks.insert(id.clone(), bank);
        if replaced.is_some() {
            warn!(bank = %id, "bank replaced");
        }
        replaced
    }

    /// Unregister a bank. Remaining banks keep their relative order.
    pub fn remove_bank(&mut self, bank: &str) -> Option<Bank> {
        let removed = self.banks.shift_remove(bank);
        if removed.is_some() {
            debug!(bank = %bank, "bank removed");
        }
        removed
    }

    pub fn bank(&self, bank: &str) -> Option<&Bank> {
        self.banks.get(bank)
    }

    /// Mutable access to a registered bank, to change its supported modes.
    pub fn bank_mut(&mut self, bank: &str) -> Option<&mut Bank> {
        self.banks.get_mut(bank)
    }

    pub fn banks(&self) -> impl Iterator<Item = &Bank> + '_ {
        self.banks.values()
    }

    /// Registered banks and their configured success rates, in routing order.
    pub fn show_distribution(&self) -> IndexMap<BankId, f64> {
        self.banks
            .iter()
            .map(|(id, bank)| (id.clone(), bank.success_rate()))
            .collect()
    }

    /// First bank, in registration order, supporting `paymode`.
    pub fn bank_for_paymode(&self, paymode: &str) -> Option<&Bank> {
        self.banks.values().find(|bank| bank.supports(paymode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(modes: &[&str]) -> HashSet<Paymode> {
        modes.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn unknown_client() {
        let registry = Registry::new();
        assert!(!registry.has_client("A"));
        assert!(registry.list_supported_paymodes(Some("A")).is_empty());
    }

    #[test]
    fn add_client_starts_empty() {
        let mut registry = Registry::new();
        registry.add_client("A");
        assert!(registry.has_client("A"));
        assert!(registry.list_supported_paymodes(Some("A")).is_empty());
    }

    #[test]
    fn re_adding_client_clears_modes() {
        let mut registry = Registry::new();
        registry.add_support_for_paymode("A", "UPI");
        registry.add_client("A");
        assert!(registry.has_client("A"));
        assert!(registry.list_supported_paymodes(Some("A")).is_empty());
    }

    #[test]
    fn remove_client() {
        let mut registry = Registry::new();
        registry.add_client("A");
        registry.remove_client("A");
        assert!(!registry.has_client("A"));

        // absent client is a no-op
        registry.remove_client("B");
        assert_eq!(registry.clients().count(), 0);
    }

    #[test]
    fn add_support_creates_client() {
        let mut registry = Registry::new();
        registry.add_support_for_paymode("A", "UPI");
        assert!(registry.has_client("A"));
        assert_eq!(registry.list_supported_paymodes(Some("A")), set(&["UPI"]));
    }

    #[test]
    fn list_all_is_flattened_union() {
        let mut registry = Registry::new();
        registry.add_support_for_paymode("A", "UPI");
        registry.add_support_for_paymode("A", "Netbanking");
        registry.add_support_for_paymode("B", "UPI");
        registry.add_support_for_paymode("B", "Credit/Debit Card");
        registry.add_client("C");

        assert_eq!(
            registry.list_supported_paymodes(None),
            set(&["UPI", "Netbanking", "Credit/Debit Card"])
        );
    }

    #[test]
    fn list_all_without_clients_is_empty() {
        assert!(Registry::new().list_supported_paymodes(None).is_empty());
    }

    #[test]
    fn remove_paymode_only_touches_clients() {
        let mut registry = Registry::new();
        registry.add_support_for_paymode("A", "UPI");
        registry.add_support_for_paymode("A", "Netbanking");
        registry.add_support_for_paymode("B", "UPI");
        registry.add_bank(Bank::new("HDFC", 0.3).with_paymode("UPI"));

        registry.remove_paymode("UPI");

        assert_eq!(registry.list_supported_paymodes(Some("A")), set(&["Netbanking"]));
        assert!(registry.list_supported_paymodes(Some("B")).is_empty());
        // client B stays registered with an empty set
        assert!(registry.has_client("B"));
        assert!(registry.bank("HDFC").unwrap().supports("UPI"));
    }

    #[test]
    fn client_supports() {
        let mut registry = Registry::new();
        registry.add_support_for_paymode("A", "UPI");
        assert!(registry.client_supports("A", "UPI"));
        assert!(!registry.client_supports("A", "Netbanking"));
        assert!(!registry.client_supports("B", "UPI"));
    }

    #[test]
    fn distribution_reports_configured_rates_in_order() {
        let mut registry = Registry::new();
        registry.add_bank(Bank::new("HDFC", 0.3));
        registry.add_bank(Bank::new("ICICI", 0.7));

        let distribution = registry.show_distribution();
        let entries: Vec<_> = distribution.iter().map(|(id, rate)| (id.as_str(), *rate)).collect();
        assert_eq!(entries, vec![("HDFC", 0.3), ("ICICI", 0.7)]);
    }

    #[test]
    fn add_bank_replaces_in_place() {
        let mut registry = Registry::new();
        assert!(registry.add_bank(Bank::new("HDFC", 0.3).with_paymode("UPI")).is_none());
        assert!(registry.add_bank(Bank::new("ICICI", 0.7)).is_none());

        let replaced = registry.add_bank(Bank::new("HDFC", 0.9)).unwrap();
        assert_eq!(replaced.success_rate(), 0.3);
        assert!(replaced.supports("UPI"));
        // the old support set goes with the old bank
        assert!(!registry.bank("HDFC").unwrap().supports("UPI"));

        let ids: Vec<_> = registry.banks().map(Bank::id).collect();
        assert_eq!(ids, vec!["HDFC", "ICICI"]);
        assert_eq!(registry.show_distribution()["HDFC"], 0.9);
    }

    #[test]
    fn remove_bank_preserves_order() {
        let mut registry = Registry::new();
        registry.add_bank(Bank::new("A", 0.1));
        registry.add_bank(Bank::new("B", 0.2));
        registry.add_bank(Bank::new("C", 0.3));

        assert_eq!(registry.remove_bank("B").map(|b| b.success_rate()), Some(0.2));
        assert!(registry.remove_bank("B").is_none());

        let ids: Vec<_> = registry.banks().map(Bank::id).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn bank_for_paymode_picks_first_registered() {
        let mut registry = Registry::new();
        registry.add_bank(Bank::new("LOW", 0.1).with_paymode("UPI"));
        registry.add_bank(Bank::new("HIGH", 0.9).with_paymode("UPI"));

        // success rate plays no part in selection
        assert_eq!(registry.bank_for_paymode("UPI").map(Bank::id), Some("LOW"));
        assert!(registry.bank_for_paymode("Netbanking").is_none());
    }

    #[test]
    fn bank_mut_changes_routing() {
        let mut registry = Registry::new();
        registry.add_bank(Bank::new("HDFC", 0.3));
        assert!(registry.bank_for_paymode("UPI").is_none());

        registry.bank_mut("HDFC").unwrap().add_supported_paymode("UPI");
        assert_eq!(registry.bank_for_paymode("UPI").map(Bank::id), Some("HDFC"));

        registry.bank_mut("HDFC").unwrap().remove_supported_paymode("UPI");
        assert!(registry.bank_for_paymode("UPI").is_none());
    }
}
