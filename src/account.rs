// 💳 Account Entity & Registry
//
// Identity: UUID (never changes). The login username is a pure function of
// the owner name, derived once at construction. Uniqueness of usernames is
// a convention of the seed data, not enforced: lookups are exact-match and
// the first registered account wins on a collision.

use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};

/// Derive the login username from an owner's display name: the lowercase
/// first letter of each whitespace-separated word, joined with no separator.
///
/// Example: "Jonas Schmedtmann" → "js"
pub fn derive_username(owner: &str) -> String {
    owner
        .to_lowercase()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A simulated bank account.
///
/// `currency` and `locale` are formatting metadata for the presentation
/// layer; no computation reads them. The balance is never stored - it is
/// recomputed from the ledger on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable identity (UUID) - never changes
    pub id: String,

    /// Full display name of the owner
    pub owner: String,

    /// Lowercase initials of `owner`, derived at construction
    pub username: String,

    /// Numeric secret, compared by exact equality
    pub pin: u32,

    /// Ordered movements with their timestamps
    pub ledger: Ledger,

    /// Percentage applied to qualifying deposits
    pub interest_rate: f64,

    /// ISO 4217 currency code (EUR, USD, ...)
    pub currency: String,

    /// BCP 47 locale tag (pt-PT, en-US, ...)
    pub locale: String,

    /// Extensible metadata bag
    pub metadata: serde_json::Value,
}

impl Account {
    pub fn new(owner: &str, pin: u32, interest_rate: f64, currency: &str, locale: &str) -> Self {
        Account {
            id: uuid::Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            username: derive_username(owner),
            pin,
            ledger: Ledger::new(),
            interest_rate,
            currency: currency.to_string(),
            locale: locale.to_string(),
            metadata: serde_json::json!({}),
        }
    }

    /// Sum of all movements. Recomputed on every call, never cached here.
    pub fn balance(&self) -> f64 {
        self.ledger.amounts().sum()
    }

    /// First whitespace-separated token of the owner name
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or("")
    }
}

// ============================================================================
// ACCOUNT REGISTRY
// ============================================================================

/// Registry of all open accounts.
///
/// Accounts are created once from seed data and removed only by the close
/// operation. All lookups are exact string matches on the username, first
/// match wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        AccountRegistry {
            accounts: Vec::new(),
        }
    }

    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        AccountRegistry { accounts }
    }

    pub fn register(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.username == username)
    }

    pub fn find_by_username_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|acc| acc.username == username)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|acc| acc.id == id)
    }

    /// Remove the first account whose username matches. Returns the removed
    /// account, `None` when nothing matched.
    pub fn remove_by_username(&mut self, username: &str) -> Option<Account> {
        let index = self
            .accounts
            .iter()
            .position(|acc| acc.username == username)?;
        Some(self.accounts.remove(index))
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_account(owner: &str, pin: u32) -> Account {
        Account::new(owner, pin, 1.2, "EUR", "pt-PT")
    }

    #[test]
    fn test_derive_username_initials() {
        assert_eq!(derive_username("Jonas Schmedtmann"), "js");
        assert_eq!(derive_username("Steven Thomas Williams"), "stw");
        assert_eq!(derive_username("Sarah Smith"), "ss");
    }

    #[test]
    fn test_derive_username_is_idempotent_and_pure() {
        let first = derive_username("Jessica Davis");
        let second = derive_username("Jessica Davis");
        assert_eq!(first, second);
        assert_eq!(first, "jd");
    }

    #[test]
    fn test_derive_username_handles_extra_whitespace() {
        assert_eq!(derive_username("  Jonas   Schmedtmann "), "js");
        assert_eq!(derive_username(""), "");
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account("Jonas Schmedtmann", 1111);

        assert!(!account.id.is_empty());
        assert_eq!(account.owner, "Jonas Schmedtmann");
        assert_eq!(account.username, "js");
        assert_eq!(account.pin, 1111);
        assert!(account.ledger.is_empty());
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_account_balance_is_recomputed_sum() {
        let mut account = create_test_account("Jonas Schmedtmann", 1111);
        let stamp = Utc.with_ymd_and_hms(2020, 7, 1, 12, 0, 0).unwrap();

        account.ledger.append(200.0, stamp);
        account.ledger.append(-50.0, stamp);
        assert_eq!(account.balance(), 150.0);

        account.ledger.append(100.0, stamp);
        assert_eq!(account.balance(), 250.0);
    }

    #[test]
    fn test_account_first_name() {
        let account = create_test_account("Steven Thomas Williams", 3333);
        assert_eq!(account.first_name(), "Steven");
    }

    #[test]
    fn test_registry_find_by_username() {
        let mut registry = AccountRegistry::new();
        registry.register(create_test_account("Jonas Schmedtmann", 1111));
        registry.register(create_test_account("Jessica Davis", 2222));

        let found = registry.find_by_username("jd");
        assert!(found.is_some());
        assert_eq!(found.unwrap().owner, "Jessica Davis");

        assert!(registry.find_by_username("zz").is_none());
    }

    #[test]
    fn test_registry_first_match_wins_on_collision() {
        let mut registry = AccountRegistry::new();
        registry.register(create_test_account("John Smith", 1111));
        registry.register(create_test_account("Jane Stone", 2222));

        // Both derive to "js"; the first registered account wins
        let found = registry.find_by_username("js").unwrap();
        assert_eq!(found.owner, "John Smith");
    }

    #[test]
    fn test_registry_remove_by_username() {
        let mut registry = AccountRegistry::new();
        registry.register(create_test_account("Jonas Schmedtmann", 1111));
        registry.register(create_test_account("Jessica Davis", 2222));

        let removed = registry.remove_by_username("js");
        assert!(removed.is_some());
        assert_eq!(removed.unwrap().owner, "Jonas Schmedtmann");
        assert_eq!(registry.count(), 1);

        // Removing an unknown username is a no-op
        assert!(registry.remove_by_username("js").is_none());
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_registry_remove_takes_first_match_only() {
        let mut registry = AccountRegistry::new();
        registry.register(create_test_account("John Smith", 1111));
        registry.register(create_test_account("Jane Stone", 2222));

        let removed = registry.remove_by_username("js").unwrap();
        assert_eq!(removed.owner, "John Smith");
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.find_by_username("js").unwrap().owner, "Jane Stone");
    }

    #[test]
    fn test_registry_find_by_id() {
        let mut registry = AccountRegistry::new();
        let account = create_test_account("Jonas Schmedtmann", 1111);
        let id = account.id.clone();
        registry.register(account);

        assert!(registry.find_by_id(&id).is_some());
        assert!(registry.find_by_id("non-existent-uuid").is_none());
    }

    #[test]
    fn test_account_serde_round_trip() {
        let mut account = create_test_account("Jonas Schmedtmann", 1111);
        let stamp = Utc.with_ymd_and_hms(2020, 7, 1, 12, 0, 0).unwrap();
        account.ledger.append(200.0, stamp);

        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, account.id);
        assert_eq!(back.username, "js");
        assert_eq!(back.ledger.len(), 1);
        assert_eq!(back.ledger.entries()[0].amount, 200.0);
    }
}
