/// payoff report - load a bills document and project every debt
use debt_payoff_rs::chrono::{TimeZone, Utc};
use debt_payoff_rs::{format_currency, Money, PayoffPlanner, PlanConfig, SafeTimeProvider, TimeSource};

const BILLS: &str = r#"{
    "items": [
        {"id": "visa", "name": "Visa", "amount": 2400, "apr": 19.99, "min_payment": 60, "due_day": 15},
        {"id": "store", "name": "Store Card", "amount": 800, "apr": 26.99, "min_payment": 35,
         "status": "30 Days Past Due"},
        {"id": "car", "name": "Car Loan", "amount": 9500, "apr": 6.5, "min_payment": 310,
         "override": {"enabled": true, "mode": "target_payments", "target_payments": 24}},
        {"id": "medical", "name": "Medical", "amount": 300, "apr": 0, "min_payment": 25}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // controlled time so the schedule dates are reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));

    let config = PlanConfig::snowball().with_extra_payment(Money::from_major(150));
    let planner = PayoffPlanner::from_json_str(BILLS, config)?;
    let report = planner.report(&time);

    println!("=== {} plan ===", report.config.strategy);
    for row in &report.plan.rows {
        println!("{:<12} {:>10}  {}", row.name, format_currency(row.payment), row.notes);
    }
    println!("all-in monthly total: {}\n", format_currency(report.all_in_total));

    for projection in &report.projections {
        match projection.schedule() {
            Some(result) => println!(
                "{}: {} months, paid off {}, interest {}",
                projection.name,
                result.months,
                result.payoff_date,
                format_currency(result.total_interest.round_cents())
            ),
            None => println!("{}: could not project", projection.name),
        }
    }

    println!();
    for rec in &report.recommendations {
        println!("{}", rec.headline());
    }

    Ok(())
}
