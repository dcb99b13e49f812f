// Bankist - Demo Banking Core Library
// Exposes all modules for use in the TUI binary and tests

pub mod account; // Account entity + registry, username derivation
pub mod ledger; // Movement Ledger - paired amount/timestamp records
pub mod seed; // Static demo fixtures
pub mod session; // Session Controller - login, transfer, loan, close
pub mod statement; // CSV / JSON statement export
pub mod summary; // Derived Value Calculator - balance, totals, interest

// Re-export commonly used types
pub use account::{derive_username, Account, AccountRegistry};
pub use ledger::{Ledger, Movement, MovementKind};
pub use seed::demo_accounts;
pub use session::{
    AccountOverview, OperationError, OperationResult, RejectionCategory, SessionController,
};
pub use statement::{csv_string, to_json, write_csv};
pub use summary::{
    balance, qualifying_interest, total_deposits, total_withdrawals, AccountSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
