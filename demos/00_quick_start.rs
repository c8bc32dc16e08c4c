/// quick start - rank, order and plan a small debt list
use debt_payoff_rs::{build_monthly_plan, rank_debts, Debt, Money, Rate, Strategy};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let debts = vec![
        Debt::builder()
            .name("Store Card")
            .balance(Money::from_major(500))
            .apr(Rate::from_apr(dec!(25)))
            .min_payment(Money::from_major(25))
            .build()?,
        Debt::builder()
            .name("Car Loan")
            .balance(Money::from_major(2_000))
            .apr(Rate::from_apr(dec!(10)))
            .min_payment(Money::from_major(50))
            .build()?,
    ];

    for ranked in rank_debts(&debts) {
        println!("{}. {} ({})", ranked.priority_rank, ranked.debt.name, ranked.priority_reason);
    }

    // $100 extra a month goes to the highest APR
    let plan = build_monthly_plan(&debts, Strategy::Avalanche, Money::from_major(100), true);
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}
