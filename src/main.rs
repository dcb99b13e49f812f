// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;

// Use library instead of local modules
use bankist::{csv_string, demo_accounts, AccountRegistry, SessionController};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "demo" {
        // Scripted demo session
        run_demo()?;
    } else {
        // UI mode (default)
        run_ui_mode()?;
    }

    Ok(())
}

fn run_demo() -> Result<()> {
    println!("🏦 Bankist - scripted demo session");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let registry = AccountRegistry::from_accounts(demo_accounts());
    let mut session = SessionController::new(registry);

    println!("\n👥 Seeded {} accounts", session.registry().count());
    for account in session.registry().accounts() {
        println!(
            "   {} ({}) - {} {:.2}",
            account.owner,
            account.username,
            account.currency,
            account.balance()
        );
    }

    // 1. Log in
    session.login("js", 1111)?;
    let overview = session.overview().context("No active session")?;
    println!("\n🔓 Logged in as {}", overview.owner);
    println!("✓ Balance: {:.2}", overview.balance);
    println!("✓ In: {:.2}", overview.summary.deposits_in);
    println!("✓ Out: {:.2}", overview.summary.withdrawals_out);
    println!("✓ Interest: {:.2}", overview.summary.interest);

    // 2. Transfer
    session.transfer("jd", 500.0)?;
    println!("\n💸 Transferred 500.00 to jd");
    let overview = session.overview().context("No active session")?;
    println!("✓ New balance: {:.2}", overview.balance);

    // 3. Loan
    session.request_loan(2000.0)?;
    println!("\n🏦 Loan of 2000.00 granted");
    let overview = session.overview().context("No active session")?;
    println!("✓ New balance: {:.2}", overview.balance);

    // 4. Statement
    let account = session.current_account().context("No active session")?;
    println!("\n🧾 Statement for {}:", account.username);
    print!("{}", csv_string(account)?);

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✅ Demo complete");

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🖥️  Loading Bankist UI...\n");

    let registry = AccountRegistry::from_accounts(demo_accounts());
    let session = SessionController::new(registry);

    println!("✓ Seeded {} demo accounts", session.registry().count());
    println!("Starting UI... (Press Esc to quit)\n");

    let mut app = ui::App::new(session);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run the scripted demo: cargo run demo");
    std::process::exit(1);
}
