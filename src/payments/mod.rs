pub mod amortization;
pub mod level_payment;
pub mod plan;

pub use amortization::{
    amortize, AmortizationResult, ScheduleEntry, MAX_SCHEDULE_PERIODS, PAYOFF_EPSILON,
};
pub use level_payment::solve_level_payment;
pub use plan::{
    build_monthly_plan, required_payment, MonthlyPlan, PaymentSource, PlanRow, RequiredPayment,
};
