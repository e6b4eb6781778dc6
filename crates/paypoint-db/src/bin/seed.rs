//! # Seed Data Generator
//!
//! Populates the database with valid payments for development.
//!
//! ## Usage
//! ```bash
//! # Generate 1,000 payments over the last 30 days (default)
//! cargo run -p paypoint-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p paypoint-db --bin seed -- --count 10000
//!
//! # Specify database path and spread
//! cargo run -p paypoint-db --bin seed -- --db ./data/paypoint.db --days 7
//! ```
//!
//! ## Generated Payments
//! Every payment method is used in turn. Each payment goes through the same
//! validation and pricing as the API, so the stored rows are exactly what the
//! server would have written:
//! - Price: 1.00 - 200.00
//! - Modifier: alternately the method's lowest and highest allowed value
//! - Additional items that satisfy the method's rule
//! - Timestamp: spread over the last `--days` days

use std::env;

use anyhow::Context;
use chrono::{Duration, Utc};
use paypoint_core::{price_payment, rule_for, AdditionalItems, PaymentMethod, PaymentRequest};
use paypoint_db::{Database, DbConfig};
use rust_decimal::Decimal;

const COURIERS: &[&str] = &["YAMATO", "SAGAWA"];
const BANKS: &[&str] = &["MUFG", "SMBC", "MIZUHO", "RESONA"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 1000;
    let mut days: i64 = 30;
    let mut db_path = String::from("./paypoint_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "--days" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30).max(1);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Paypoint Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of payments to generate (default: 1000)");
                println!("      --days <N>     Spread payments over the last N days (default: 30)");
                println!("  -d, --db <PATH>    Database file path (default: ./paypoint_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Paypoint Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Payments: {}", count);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.payments().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} payments", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating payments...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let request = generate_request(seed, days);
        let method = request.payment_method;

        let priced = price_payment(request)
            .with_context(|| format!("generated payment {seed} ({method}) was rejected"))?;

        if let Err(e) = db.payments().record(&priced).await {
            eprintln!("Failed to insert payment {}: {}", seed, e);
            continue;
        }

        generated += 1;
        if generated % 500 == 0 {
            println!("  Generated {} payments...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} payments in {:?}", generated, elapsed);
    println!(
        "  Rate: {:.0} payments/second",
        generated as f64 / elapsed.as_secs_f64()
    );

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Builds a valid request from an index. Deterministic for a given
/// `(seed, days)` apart from the anchor time.
fn generate_request(seed: usize, days: i64) -> PaymentRequest {
    let method = PaymentMethod::ALL[seed % PaymentMethod::ALL.len()];
    let rule = rule_for(method);

    // 1.00 - 200.00
    let price = Decimal::new(100 + ((seed * 7919) % 19_901) as i64, 2);
    let price_modifier = if seed % 2 == 0 {
        rule.modifier_min
    } else {
        rule.modifier_max
    };

    let spread_secs = days * 86_400;
    let offset = ((seed as i64) * 7_919) % spread_secs;
    let datetime = (Utc::now() - Duration::seconds(offset)).fixed_offset();

    PaymentRequest {
        customer_id: format!("CUST-{:05}", seed % 500),
        price,
        price_modifier,
        payment_method: method,
        datetime,
        additional_item: additional_items_for(method, seed),
    }
}

fn additional_items_for(method: PaymentMethod, seed: usize) -> AdditionalItems {
    let pairs: Vec<(&str, String)> = match method {
        PaymentMethod::CashOnDelivery => {
            vec![("courier", COURIERS[seed % COURIERS.len()].to_string())]
        }
        PaymentMethod::Visa
        | PaymentMethod::Mastercard
        | PaymentMethod::Amex
        | PaymentMethod::Jcb => vec![("last4", format!("{:04}", seed % 10_000))],
        PaymentMethod::BankTransfer => vec![
            ("bank", BANKS[seed % BANKS.len()].to_string()),
            ("accountNumber", format!("{:07}", seed * 31 % 10_000_000)),
        ],
        PaymentMethod::Cheque => vec![
            ("bank", BANKS[seed % BANKS.len()].to_string()),
            ("chequeNumber", format!("{:06}", seed)),
        ],
        PaymentMethod::Cash
        | PaymentMethod::LinePay
        | PaymentMethod::Paypay
        | PaymentMethod::Points
        | PaymentMethod::GrabPay => Vec::new(),
    };

    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
