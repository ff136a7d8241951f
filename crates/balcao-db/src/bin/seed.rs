//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p balcao-db --bin seed
//!
//! # Specify database path
//! cargo run -p balcao-db --bin seed -- --db ./data/balcao.db
//!
//! # Also generate a month of demo orders
//! cargo run -p balcao-db --bin seed -- --orders
//! ```
//!
//! ## Generated Data
//! A building-materials catalog (cement, sand, gravel, bricks, rebar, ...)
//! with realistic Brazilian counter prices, a handful of regular customers,
//! and optionally a month of orders spread across payment methods so the
//! reports screen has something to show.

use chrono::{Duration, Utc};
use std::env;
use uuid::Uuid;

use balcao_core::{next_order_number, Customer, Order, OrderItem, PaymentMethod, Product};
use balcao_db::{Database, DbConfig};

/// Catalog entries: (name, brand, unit, price).
const CATALOG: &[(&str, Option<&str>, &str, &str)] = &[
    ("Cimento CP-II 50kg", Some("Votoran"), "saco", "32.90"),
    ("Cimento CP-II 50kg", Some("Cauê"), "saco", "31.50"),
    ("Cal Hidratada 20kg", Some("Itaú"), "saco", "14.90"),
    ("Areia Média", None, "m³", "120.00"),
    ("Areia Fina", None, "m³", "135.00"),
    ("Brita 0", None, "m³", "95.00"),
    ("Brita 1", None, "m³", "90.00"),
    ("Tijolo Baiano 9x19x19", None, "un", "1.10"),
    ("Tijolo Maciço", None, "un", "0.95"),
    ("Bloco de Concreto 14x19x39", None, "un", "3.40"),
    ("Vergalhão CA-50 10mm 12m", Some("Gerdau"), "barra", "42.00"),
    ("Vergalhão CA-50 8mm 12m", Some("Gerdau"), "barra", "28.50"),
    ("Arame Recozido 1kg", None, "rolo", "12.90"),
    ("Prego 17x27 1kg", Some("Gerdau"), "kg", "15.80"),
    ("Argamassa AC-I 20kg", Some("Quartzolit"), "saco", "13.90"),
    ("Rejunte Branco 1kg", Some("Quartzolit"), "saco", "6.50"),
    ("Cano PVC 100mm 6m", Some("Tigre"), "barra", "89.00"),
    ("Cano PVC 25mm 6m", Some("Tigre"), "barra", "21.90"),
    ("Tinta Acrílica Branca 18L", Some("Suvinil"), "lata", "289.00"),
    ("Massa Corrida 25kg", Some("Coral"), "saco", "49.90"),
];

/// Demo customers: (name, phone).
const CUSTOMERS: &[(&str, Option<&str>)] = &[
    ("Maria Silva", Some("(11) 99123-4567")),
    ("João Pedreiro", Some("(11) 98765-4321")),
    ("Construtora Boa Obra", Some("(11) 3456-7890")),
    ("Seu Antônio", None),
    ("Dona Lúcia", Some("(11) 97654-3210")),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./balcao_dev.db");
    let mut with_orders = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--orders" | "-o" => {
                with_orders = true;
            }
            "--help" | "-h" => {
                println!("Balcão POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./balcao_dev.db)");
                println!("  -o, --orders       Also generate a month of demo orders");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Balcão POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let now = Utc::now();
    let mut products = Vec::new();
    for (name, brand, unit, price) in CATALOG {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            brand: brand.map(str::to_string),
            unit: unit.to_string(),
            price: price.parse()?,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
        products.push(product);
    }
    println!("✓ {} products", products.len());

    let mut customers = Vec::new();
    for (name, phone) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        db.customers().insert(&customer).await?;
        customers.push(customer);
    }
    println!("✓ {} customers", customers.len());

    if with_orders {
        println!();
        println!("Generating demo orders...");

        let mut generated = 0;
        for day_offset in 0..30 {
            // 1-3 orders per day, deterministic spread
            let orders_today = 1 + (day_offset % 3);
            for slot in 0..orders_today {
                let seed = day_offset * 7 + slot * 3;
                let method = PaymentMethod::ALL[seed % PaymentMethod::ALL.len()];

                // Fiado needs a customer; other methods get one sometimes
                let customer = if method == PaymentMethod::CreditSale || seed % 4 == 0 {
                    Some(customers[seed % customers.len()].clone())
                } else {
                    None
                };

                let number = next_order_number(db.orders().max_number().await?);
                let mut order = Order::new(number, method, customer);
                order.stamp_created_at(
                    now - Duration::days(29 - day_offset as i64) + Duration::hours(slot as i64),
                );

                for line in 0..(1 + seed % 3) {
                    let product = &products[(seed + line * 5) % products.len()];
                    let quantity = format!("{}", 1 + (seed + line) % 4).parse()?;
                    order.push_item(OrderItem::new(product, quantity, product.price));
                }

                db.orders().insert_with_items(&mut order).await?;
                generated += 1;
            }
        }
        println!("✓ {} orders", generated);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
