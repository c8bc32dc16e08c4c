pub mod calendar;
pub mod config;
pub mod debt;
pub mod decimal;
pub mod errors;
pub mod ordering;
pub mod payments;
pub mod planner;
pub mod recommendations;
pub mod record;
pub mod summary;
pub mod types;

// re-export key types
pub use calendar::{add_month_clamped, month_grid, MonthGrid};
pub use config::PlanConfig;
pub use debt::{Debt, DebtBuilder};
pub use decimal::{format_currency, format_percent, format_whole_currency, Money, Rate};
pub use errors::{PayoffError, Result};
pub use ordering::{order_debts, rank_debts, PriorityKey, RankedDebt, StrategyKey};
pub use payments::{
    amortize, build_monthly_plan, solve_level_payment, AmortizationResult, MonthlyPlan, PlanRow,
    ScheduleEntry,
};
pub use planner::{PayoffPlanner, PlanReport, Projection, ProjectionOutcome};
pub use recommendations::{recommend, Recommendation};
pub use record::{debts_from_json_str, parse_debt, parse_debts};
pub use summary::PortfolioOverview;
pub use types::{
    DebtId, DebtStatus, PaymentOverride, PlanRowKind, RecommendationLevel, Strategy,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
