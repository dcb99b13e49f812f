// 🔐 Session Controller - single active session over the account registry
//
// Two states: logged out, or logged in against exactly one account.
// Every operation is guarded; a failed guard changes nothing and reports
// the reason. The presentation layer discards the reason and stays
// silent; the explicit result exists so callers and tests can see what
// happened.

use crate::account::{Account, AccountRegistry};
use crate::ledger::Movement;
use crate::summary::AccountSummary;
use chrono::Utc;
use serde::Serialize;

// ============================================================================
// REJECTION REASONS
// ============================================================================

/// Why an operation was refused. State is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// No active session; the previous one was closed or never opened
    NotLoggedIn,
    /// Login username did not resolve to an account
    UnknownUsername(String),
    /// Transfer recipient did not resolve to an account
    UnknownRecipient(String),
    /// Pin did not match the account's pin exactly
    WrongPin,
    /// Close confirmation username did not match the current account
    UsernameMismatch,
    /// Transfers move at least 1 currency unit
    AmountBelowMinimum,
    /// Loan requests must be positive after flooring
    AmountNotPositive,
    /// Transfer amount exceeds the sender's balance
    InsufficientFunds,
    /// Sender and recipient are the same account
    SelfTransfer,
    /// No historical movement justifies the requested loan
    LoanNotJustified,
}

/// The two kinds of rejection worth telling apart internally. The
/// presentation layer treats them identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCategory {
    Validation,
    NotFound,
}

impl OperationError {
    pub fn category(&self) -> RejectionCategory {
        match self {
            OperationError::UnknownUsername(_) | OperationError::UnknownRecipient(_) => {
                RejectionCategory::NotFound
            }
            _ => RejectionCategory::Validation,
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationError::NotLoggedIn => write!(f, "no active session"),
            OperationError::UnknownUsername(username) => {
                write!(f, "unknown username: {}", username)
            }
            OperationError::UnknownRecipient(username) => {
                write!(f, "unknown recipient: {}", username)
            }
            OperationError::WrongPin => write!(f, "pin does not match"),
            OperationError::UsernameMismatch => write!(f, "username does not match"),
            OperationError::AmountBelowMinimum => write!(f, "transfer amount below minimum of 1"),
            OperationError::AmountNotPositive => write!(f, "amount must be positive"),
            OperationError::InsufficientFunds => write!(f, "amount exceeds balance"),
            OperationError::SelfTransfer => write!(f, "cannot transfer to the same account"),
            OperationError::LoanNotJustified => {
                write!(f, "no movement justifies the requested loan")
            }
        }
    }
}

impl std::error::Error for OperationError {}

pub type OperationResult = Result<(), OperationError>;

// ============================================================================
// ACCOUNT OVERVIEW
// ============================================================================

/// Snapshot of the current account for the presentation layer, produced
/// after every action: balance, movements in display order, and the
/// derived summary figures. Formatting is the consumer's job.
#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    pub owner: String,
    pub username: String,
    pub currency: String,
    pub locale: String,
    pub balance: f64,
    pub movements: Vec<Movement>,
    pub summary: AccountSummary,
    pub sorted: bool,
}

// ============================================================================
// SESSION CONTROLLER
// ============================================================================

/// Owns the registry and the single active session. All mutation of
/// accounts goes through here, serialized by the caller's event loop.
pub struct SessionController {
    registry: AccountRegistry,
    /// Id of the logged-in account, if any
    current: Option<String>,
    /// Display-order flag; never touches the stored ledgers
    sorted: bool,
}

impl SessionController {
    pub fn new(registry: AccountRegistry) -> Self {
        SessionController {
            registry,
            current: None,
            sorted: false,
        }
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_account().is_some()
    }

    pub fn current_account(&self) -> Option<&Account> {
        let id = self.current.as_deref()?;
        self.registry.find_by_id(id)
    }

    fn require_login(&self) -> Result<&Account, OperationError> {
        self.current
            .as_deref()
            .and_then(|id| self.registry.find_by_id(id))
            .ok_or(OperationError::NotLoggedIn)
    }

    /// Open a session iff the username resolves and the pin matches
    /// exactly. No hashing, no lockout, no rate limiting. A failed login
    /// leaves the previous session state untouched.
    pub fn login(&mut self, username: &str, pin: u32) -> OperationResult {
        let account = self
            .registry
            .find_by_username(username)
            .ok_or_else(|| OperationError::UnknownUsername(username.to_string()))?;

        if account.pin != pin {
            return Err(OperationError::WrongPin);
        }

        self.current = Some(account.id.clone());
        self.sorted = false;
        Ok(())
    }

    /// Drop the session without touching the registry.
    pub fn logout(&mut self) {
        self.current = None;
        self.sorted = false;
    }

    /// Move `amount` from the current account to `recipient_username`.
    ///
    /// Valid iff the recipient exists, the amount is at least 1, the
    /// sender's balance covers it, and the recipient is not the sender.
    /// On success both ledgers gain exactly one entry stamped now.
    pub fn transfer(&mut self, recipient_username: &str, amount: f64) -> OperationResult {
        let sender = self.require_login()?;
        let sender_id = sender.id.clone();
        let sender_username = sender.username.clone();
        let sender_balance = sender.balance();

        let recipient = self
            .registry
            .find_by_username(recipient_username)
            .ok_or_else(|| OperationError::UnknownRecipient(recipient_username.to_string()))?;
        let recipient_id = recipient.id.clone();
        let recipient_username = recipient.username.clone();

        if amount < 1.0 {
            return Err(OperationError::AmountBelowMinimum);
        }
        if amount > sender_balance {
            return Err(OperationError::InsufficientFunds);
        }
        if recipient_username == sender_username {
            return Err(OperationError::SelfTransfer);
        }

        let now = Utc::now();
        if let Some(sender) = self.registry.find_by_id_mut(&sender_id) {
            sender.ledger.append(-amount, now);
        }
        if let Some(recipient) = self.registry.find_by_id_mut(&recipient_id) {
            recipient.ledger.append(amount, now);
        }
        Ok(())
    }

    /// Grant a loan of `amount`, floored to a whole currency unit.
    ///
    /// Valid iff the floored amount is positive and some historical
    /// movement `m` satisfies `amount >= 0.1 * m`. The rule applies to
    /// every movement, negatives included.
    pub fn request_loan(&mut self, amount: f64) -> OperationResult {
        let amount = amount.floor();

        let account = self.require_login()?;
        if amount <= 0.0 {
            return Err(OperationError::AmountNotPositive);
        }
        if !account.ledger.amounts().any(|m| amount >= 0.1 * m) {
            return Err(OperationError::LoanNotJustified);
        }
        let id = account.id.clone();

        let now = Utc::now();
        if let Some(account) = self.registry.find_by_id_mut(&id) {
            account.ledger.append(amount, now);
        }
        Ok(())
    }

    /// Close the current account iff the confirmation username and pin
    /// both match it exactly. The account leaves the registry and the
    /// session ends; later operations are rejected, never applied to a
    /// stale account.
    pub fn close_account(&mut self, username: &str, pin: u32) -> OperationResult {
        let account = self.require_login()?;

        if username != account.username {
            return Err(OperationError::UsernameMismatch);
        }
        if pin != account.pin {
            return Err(OperationError::WrongPin);
        }
        let username = account.username.clone();

        self.registry.remove_by_username(&username);
        self.current = None;
        self.sorted = false;
        Ok(())
    }

    /// Flip the display-order flag. Presentation-only: the stored ledger
    /// is never mutated.
    pub fn toggle_sort(&mut self) -> OperationResult {
        self.require_login()?;
        self.sorted = !self.sorted;
        Ok(())
    }

    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Current account snapshot for the presentation layer, `None` when
    /// logged out. Movement order honors the sort flag.
    pub fn overview(&self) -> Option<AccountOverview> {
        let account = self.current_account()?;

        let movements = if self.sorted {
            account.ledger.sorted_view()
        } else {
            account.ledger.entries().to_vec()
        };

        Some(AccountOverview {
            owner: account.owner.clone(),
            username: account.username.clone(),
            currency: account.currency.clone(),
            locale: account.locale.clone(),
            balance: account.balance(),
            movements,
            summary: AccountSummary::for_account(account),
            sorted: self.sorted,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
