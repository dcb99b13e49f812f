// 🌱 Demo fixtures - the four simulated accounts the process boots with
//
// Accounts are created once at startup; movements carry fixed historical
// timestamps so every run starts from the same ledger state.

use crate::account::Account;
use chrono::{DateTime, TimeZone, Utc};

fn stamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    // Fixture literals, known valid
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

fn seeded(
    owner: &str,
    pin: u32,
    interest_rate: f64,
    currency: &str,
    locale: &str,
    movements: &[(f64, DateTime<Utc>)],
) -> Account {
    let mut account = Account::new(owner, pin, interest_rate, currency, locale);
    for (amount, timestamp) in movements {
        account.ledger.append(*amount, *timestamp);
    }
    account
}

/// The demo bank's static seed data.
pub fn demo_accounts() -> Vec<Account> {
    vec![
        seeded(
            "Jonas Schmedtmann",
            1111,
            1.2,
            "EUR",
            "pt-PT",
            &[
                (200.0, stamp(2019, 11, 18, 21, 31, 17)),
                (455.23, stamp(2019, 12, 23, 7, 42, 2)),
                (-306.5, stamp(2020, 1, 28, 9, 15, 4)),
                (25000.0, stamp(2020, 4, 1, 10, 17, 24)),
                (-642.21, stamp(2020, 5, 8, 14, 11, 59)),
                (-133.9, stamp(2020, 5, 27, 17, 1, 17)),
                (79.97, stamp(2020, 7, 11, 23, 36, 17)),
                (1300.0, stamp(2020, 7, 12, 10, 51, 36)),
            ],
        ),
        seeded(
            "Jessica Davis",
            2222,
            1.5,
            "USD",
            "en-US",
            &[
                (5000.0, stamp(2019, 11, 1, 13, 15, 33)),
                (3400.0, stamp(2019, 11, 30, 9, 48, 16)),
                (-150.0, stamp(2019, 12, 25, 6, 4, 23)),
                (-790.0, stamp(2020, 1, 25, 14, 18, 46)),
                (-3210.0, stamp(2020, 2, 5, 16, 33, 6)),
                (-1000.0, stamp(2020, 4, 10, 14, 43, 26)),
                (8500.0, stamp(2020, 6, 25, 18, 49, 59)),
                (-30.0, stamp(2020, 7, 26, 12, 1, 20)),
            ],
        ),
        seeded(
            "Steven Thomas Williams",
            3333,
            0.7,
            "EUR",
            "en-GB",
            &[
                (200.0, stamp(2019, 12, 2, 10, 2, 11)),
                (-200.0, stamp(2020, 1, 14, 8, 30, 45)),
                (340.0, stamp(2020, 2, 19, 15, 22, 8)),
                (-300.0, stamp(2020, 3, 7, 11, 5, 52)),
                (-20.0, stamp(2020, 4, 22, 19, 44, 30)),
                (50.0, stamp(2020, 5, 30, 7, 12, 3)),
                (400.0, stamp(2020, 6, 18, 16, 58, 41)),
                (-460.0, stamp(2020, 7, 20, 13, 27, 9)),
            ],
        ),
        seeded(
            "Sarah Smith",
            4444,
            1.0,
            "USD",
            "en-US",
            &[
                (430.0, stamp(2020, 2, 11, 9, 40, 18)),
                (1000.0, stamp(2020, 3, 29, 12, 16, 55)),
                (700.0, stamp(2020, 5, 16, 18, 3, 37)),
                (50.0, stamp(2020, 6, 27, 8, 52, 26)),
                (90.0, stamp(2020, 7, 23, 20, 34, 14)),
            ],
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts_shape() {
        let accounts = demo_accounts();
        assert_eq!(accounts.len(), 4);

        let usernames: Vec<&str> = accounts.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(usernames, vec!["js", "jd", "stw", "ss"]);
    }

    #[test]
    fn test_demo_accounts_expected_balance() {
        let accounts = demo_accounts();
        assert!((accounts[0].balance() - 25952.59).abs() < 1e-9);
    }

    #[test]
    fn test_demo_movements_have_timestamps_in_order() {
        for account in demo_accounts() {
            let entries = account.ledger.entries();
            for pair in entries.windows(2) {
                assert!(pair[0].timestamp <= pair[1].timestamp);
            }
        }
    }

    #[test]
    fn test_demo_accounts_get_fresh_identities() {
        let first = demo_accounts();
        let second = demo_accounts();
        assert_ne!(first[0].id, second[0].id);
    }
}
