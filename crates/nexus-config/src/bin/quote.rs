//! # Single-Sale Quote
//!
//! Prints what a producer keeps from one sale under the configured policy.
//!
//! ## Usage
//! ```bash
//! # Example sale (R$ 197,00), 30/day for 30 days, no tools
//! cargo run -p nexus-config --bin quote
//!
//! # Custom scenario
//! cargo run -p nexus-config --bin quote -- --price "297,00" --limit 40 --days 45 \
//!     --tools marketing_pack,jurista_ia --upfront
//! ```

use std::env;
use std::path::PathBuf;

use nexus_config::{init_tracing, PricingConfig};
use nexus_core::validation::{parse_money_input, validate_sale_price};
use nexus_core::{
    CashflowProjector, CreditCalculator, CreditConfiguration, DilutionFinancer, PaymentSelection,
    PaymentType, SaleScenario, ToolId,
};
use tracing::{debug, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut price: Option<String> = None;
    let mut limit: i64 = 30;
    let mut days: i64 = 30;
    let mut tool_ids: Vec<String> = Vec::new();
    let mut payment_type = PaymentType::Diluted;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--price" | "-p" => {
                if i + 1 < args.len() {
                    price = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--limit" | "-l" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(v) => limit = v,
                        Err(_) => warn!(
                            value = %args[i + 1],
                            "Ignoring unparseable --limit, keeping {}",
                            limit
                        ),
                    }
                    i += 1;
                }
            }
            "--days" | "-d" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(v) => days = v,
                        Err(_) => warn!(
                            value = %args[i + 1],
                            "Ignoring unparseable --days, keeping {}",
                            days
                        ),
                    }
                    i += 1;
                }
            }
            "--tools" | "-t" => {
                if i + 1 < args.len() {
                    tool_ids = args[i + 1].split(',').map(|s| s.trim().to_string()).collect();
                    i += 1;
                }
            }
            "--upfront" => payment_type = PaymentType::Upfront,
            "--help" | "-h" => {
                println!("Nexus Single-Sale Quote");
                println!();
                println!("Usage: quote [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   Pricing config file (default: platform config dir)");
                println!("  -p, --price <AMOUNT>  Sale price, e.g. \"197,00\" (default: policy example)");
                println!("  -l, --limit <N>       Daily interaction limit (default: 30)");
                println!("  -d, --days <N>        Course duration in days (default: 30)");
                println!("  -t, --tools <IDS>     Comma-separated tool ids");
                println!("      --upfront         Pay tool setup now instead of diluting");
                println!("  -h, --help            Show this help message");
                println!();
                println!("Tools: {}", ToolId::ALL.map(|t| t.as_str()).join(", "));
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = PricingConfig::load(config_path)?;
    let policy = config.policy();
    let catalog = config.catalog()?;
    debug!(?policy, tools = catalog.len(), "Pricing config ready");

    let sale_price = match price {
        Some(raw) => parse_money_input(&raw)?,
        None => policy.example_sale_price,
    };
    validate_sale_price(sale_price)?;

    let calc = CreditCalculator::new(policy);
    let credits = CreditConfiguration::new(limit, days);

    let selection = PaymentSelection::from_persisted(&tool_ids, Some(payment_type));
    for raw in &tool_ids {
        if raw.parse::<ToolId>().is_err() {
            warn!(tool = %raw, "Unknown tool id skipped");
        }
    }
    if selection.selected_tools().iter().any(|id| catalog.find(*id).is_none()) {
        warn!("Some selected tools are not in the configured catalog and cost nothing");
    }

    let assessment = credits.assess(&calc);
    let dilution = DilutionFinancer::new(&catalog, &policy).quote(selection.selected_tools());
    let proceeds = CashflowProjector::new(&catalog, policy)
        .project_single_sale(&SaleScenario::from_wizard(sale_price, &credits, &selection));

    println!("Nexus Single-Sale Quote");
    println!("=======================");
    println!(
        "Credits:      {}/day x {} days = {} (recommended {}/day)",
        credits.daily_limit,
        credits.course_duration_days,
        assessment.total_credits,
        assessment.recommended_limit
    );
    if assessment.is_below_recommended {
        println!(
            "              {}% below the recommended limit",
            assessment.deficit_percent
        );
    }
    println!("Payment:      {}", selection.payment_type());
    println!("Terms:        {}", credits.terms_snippet());
    println!();
    println!("Sale price                  {:>14}", proceeds.sale_price.to_string());
    println!("(-) Embedded AI cost        {:>14}", proceeds.embedded_cost.to_string());
    if proceeds.break_even_applies {
        println!(
            "(-) Tool dilution           {:>14}",
            proceeds.dilution_deduction.to_string()
        );
    }
    println!("------------------------------------------");
    println!("= Received by producer      {:>14}", proceeds.net_proceeds.to_string());

    if proceeds.has_tools_cost {
        println!();
        if proceeds.break_even_applies {
            println!(
                "Diluted setup fee {} repaid after {} sales",
                dilution.diluted_setup_fee, proceeds.sales_to_break_even
            );
        } else {
            println!("Setup fee due now (no markup)");
        }
    }
    if proceeds.monthly_fee_per_student.is_positive() {
        println!(
            "Monthly tool fee per active student: {}",
            proceeds.monthly_fee_per_student
        );
    }

    Ok(())
}
