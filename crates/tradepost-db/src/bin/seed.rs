//! # Seed Data Generator
//!
//! Populates a development database with a small demo dataset: three
//! products and two partners, enough to exercise posting, reports and
//! sync by hand.
//!
//! ## Usage
//! ```bash
//! cargo run -p tradepost-db --bin seed
//!
//! # Specify database path
//! cargo run -p tradepost-db --bin seed -- --db ./data/tradepost.db
//! ```
//!
//! Seeding is skipped when the database already contains products or
//! partners, so it is safe to run on every dev start.

use std::env;

use tradepost_core::{CreatePartnerRequest, CreateProductRequest, Money, PartnerKind};
use tradepost_db::{Database, DbConfig};

fn demo_products() -> Vec<CreateProductRequest> {
    vec![
        CreateProductRequest {
            sku: Some("MS-001".to_string()),
            barcode: None,
            name: "Wireless Mouse".to_string(),
            description: Some("2.4 GHz optical mouse".to_string()),
            quantity: 50,
            cost_price: Money::from_cents(1000),
            selling_price: Money::from_cents(2500),
            min_stock_level: 5,
            category: Some("Electronics".to_string()),
            is_active: true,
        },
        CreateProductRequest {
            sku: Some("KB-002".to_string()),
            barcode: None,
            name: "Mechanical Keyboard".to_string(),
            description: Some("87-key tenkeyless, brown switches".to_string()),
            quantity: 20,
            cost_price: Money::from_cents(4000),
            selling_price: Money::from_cents(8999),
            min_stock_level: 5,
            category: Some("Electronics".to_string()),
            is_active: true,
        },
        CreateProductRequest {
            sku: Some("CB-003".to_string()),
            barcode: None,
            name: "USB-C Cable".to_string(),
            description: Some("1m braided cable".to_string()),
            quantity: 100,
            cost_price: Money::from_cents(200),
            selling_price: Money::from_cents(999),
            min_stock_level: 10,
            category: Some("Accessories".to_string()),
            is_active: true,
        },
    ]
}

fn demo_partners() -> Vec<CreatePartnerRequest> {
    vec![
        CreatePartnerRequest {
            name: "Walk-in Customer".to_string(),
            kind: PartnerKind::Customer,
            phone: None,
            email: Some("guest@store.com".to_string()),
            address: None,
            is_active: true,
        },
        CreatePartnerRequest {
            name: "Tech Supplier Inc.".to_string(),
            kind: PartnerKind::Supplier,
            phone: Some("555-0199".to_string()),
            email: Some("orders@techsupplier.com".to_string()),
            address: Some("42 Industrial Way".to_string()),
            is_active: true,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/tradepost.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tradepost Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./data/tradepost.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Tradepost Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing_products = db.products().list_all().await?;
    let existing_partners = db.partners().list_all().await?;
    if !existing_products.is_empty() || !existing_partners.is_empty() {
        println!(
            "⚠ Database already has {} products and {} partners",
            existing_products.len(),
            existing_partners.len()
        );
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    for req in demo_products() {
        let product = db.products().create(&req).await?;
        println!(
            "  + product {} ({}, stock {})",
            product.name,
            product.sku.as_deref().unwrap_or("-"),
            product.quantity
        );
    }
    for req in demo_partners() {
        let partner = db.partners().create(&req).await?;
        println!("  + partner {} ({:?})", partner.name, partner.kind);
    }

    // First read creates the settings row too.
    let settings = db.settings().get().await?;
    println!("  + settings for \"{}\"", settings.store_name);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
