// 🧾 Statement Export - dump an account's ledger for the outside world
//
// CSV rows are oldest-first, one per movement; derived figures are the
// consumer's job. JSON is a straight serde dump of the account.

use crate::account::Account;
use anyhow::{Context, Result};
use std::io::Write;

/// Write a CSV statement: a header row, then date/type/amount for every
/// movement in stored (chronological) order.
pub fn write_csv<W: Write>(account: &Account, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["date", "type", "amount"])
        .context("Failed to write statement header")?;

    for movement in account.ledger.entries() {
        csv_writer
            .write_record([
                movement.timestamp.to_rfc3339(),
                movement.kind().as_str().to_string(),
                format!("{:.2}", movement.amount),
            ])
            .context("Failed to write statement row")?;
    }

    csv_writer.flush().context("Failed to flush statement")?;
    Ok(())
}

/// Render the CSV statement into a String.
pub fn csv_string(account: &Account) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(account, &mut buffer)?;
    String::from_utf8(buffer).context("Statement was not valid UTF-8")
}

/// Serialize the full account (identity, ledger, metadata) as pretty JSON.
pub fn to_json(account: &Account) -> Result<String> {
    serde_json::to_string_pretty(account).context("Failed to serialize account")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_account() -> Account {
        let mut account = Account::new("Jonas Schmedtmann", 1111, 1.2, "EUR", "pt-PT");
        account
            .ledger
            .append(200.0, Utc.with_ymd_and_hms(2019, 11, 18, 21, 31, 17).unwrap());
        account
            .ledger
            .append(-306.5, Utc.with_ymd_and_hms(2020, 1, 28, 9, 15, 4).unwrap());
        account
    }

    #[test]
    fn test_csv_one_row_per_movement_plus_header() {
        let account = create_test_account();
        let csv = csv_string(&account).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,type,amount");
        assert!(lines[1].contains("deposit"));
        assert!(lines[1].ends_with("200.00"));
        assert!(lines[2].contains("withdrawal"));
        assert!(lines[2].ends_with("-306.50"));
    }

    #[test]
    fn test_csv_empty_ledger_is_header_only() {
        let account = Account::new("Sarah Smith", 4444, 1.0, "USD", "en-US");
        let csv = csv_string(&account).unwrap();
        assert_eq!(csv.trim(), "date,type,amount");
    }

    #[test]
    fn test_json_round_trip() {
        let account = create_test_account();
        let json = to_json(&account).unwrap();

        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back.username, "js");
        assert_eq!(back.ledger.len(), 2);
        assert_eq!(back.balance(), account.balance());
    }
}
