use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::PlanConfig;
use crate::debt::Debt;
use crate::decimal::{Money, Rate};
use crate::errors::{PayoffError, Result};
use crate::ordering::{order_debts, rank_debts, RankedDebt};
use crate::payments::{amortize, build_monthly_plan, AmortizationResult, MonthlyPlan};
use crate::record::debts_from_json_str;
use crate::recommendations::{recommend, Recommendation};
use crate::summary::PortfolioOverview;
use crate::types::{DebtId, DebtStatus};

/// a debt list plus the configuration to plan it with
///
/// Every call recomputes from `debts` and `config`; nothing is cached.
#[derive(Debug, Clone)]
pub struct PayoffPlanner {
    pub debts: Vec<Debt>,
    pub config: PlanConfig,
}

impl PayoffPlanner {
    pub fn new(debts: Vec<Debt>, config: PlanConfig) -> Self {
        Self { debts, config }
    }

    /// load the debt list from a JSON document
    pub fn from_json_str(debts_json: &str, config: PlanConfig) -> Result<Self> {
        Ok(Self::new(debts_from_json_str(debts_json)?, config))
    }

    pub fn get_debt(&self, id: &DebtId) -> Option<&Debt> {
        self.debts.iter().find(|d| &d.id == id)
    }

    /// urgency ranking, independent of the strategy
    pub fn rank(&self) -> Vec<RankedDebt> {
        rank_debts(&self.debts)
    }

    /// every debt in payoff-priority order for the configured strategy
    pub fn order(&self) -> Vec<Debt> {
        order_debts(&self.debts, self.config.strategy, self.config.status_override)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn monthly_plan(&self) -> MonthlyPlan {
        build_monthly_plan(
            &self.debts,
            self.config.strategy,
            self.config.extra_payment,
            self.config.status_override,
        )
    }

    /// payoff schedule for one debt at its all-in monthly payment
    pub fn project(&self, id: &DebtId, time_provider: &SafeTimeProvider) -> Result<AmortizationResult> {
        let debt = self
            .get_debt(id)
            .ok_or_else(|| PayoffError::DebtNotFound { id: id.clone() })?;
        let plan = self.monthly_plan();
        let start = self.config.start_date(time_provider);
        amortize(debt.balance, debt.apr, projected_payment(debt, &plan), start)
    }

    /// everything a presentation layer shows, computed in one pass
    pub fn report(&self, time_provider: &SafeTimeProvider) -> PlanReport {
        let start_date = self.config.start_date(time_provider);
        let plan = self.monthly_plan();

        let ordered = order_debts(&self.debts, self.config.strategy, self.config.status_override);
        let strategy_order: Vec<OrderedDebt> = ordered
            .into_iter()
            .enumerate()
            .map(|(i, d)| OrderedDebt {
                position: i + 1,
                id: d.id.clone(),
                name: d.name.clone(),
                balance: d.balance,
                apr: d.apr,
                status: d.status.clone(),
            })
            .collect();

        let projections: Vec<Projection> = strategy_order
            .iter()
            .filter_map(|o| self.get_debt(&o.id))
            .filter(|d| d.balance.is_positive())
            .map(|debt| {
                let payment = projected_payment(debt, &plan).round_cents();
                let outcome = match amortize(debt.balance, debt.apr, payment, start_date) {
                    Ok(result) => ProjectionOutcome::Scheduled(result),
                    Err(e) => {
                        warn!("could not project {}: {}", debt.name, e);
                        ProjectionOutcome::Failed { error: e.to_string() }
                    }
                };
                Projection {
                    debt_id: debt.id.clone(),
                    name: debt.name.clone(),
                    payment,
                    outcome,
                }
            })
            .collect();

        let report = PlanReport {
            start_date,
            config: self.config.clone(),
            overview: PortfolioOverview::from_debts(&self.debts),
            ranked: self.rank(),
            strategy_order,
            required_total: plan.required_total(),
            extra_total: plan.extra_total(),
            all_in_total: plan.all_in_total(),
            recommendations: recommend(&self.debts, &plan),
            plan,
            projections,
        };

        info!(
            "{} report for {} debts: {} a month, {} projections failed",
            report.config.strategy,
            self.debts.len(),
            report.all_in_total,
            report.failed_projections().count()
        );
        report
    }
}

/// the plan's rows for a debt, else its minimum payment
fn projected_payment(debt: &Debt, plan: &MonthlyPlan) -> Money {
    match plan.payment_for(&debt.id) {
        Some(payment) => payment,
        None => {
            debug!("{} has no plan row, projecting at its minimum", debt.name);
            debt.min_payment
        }
    }
}

/// one line of the strategy order preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedDebt {
    /// 1-based
    pub position: usize,
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
    pub apr: Rate,
    pub status: DebtStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProjectionOutcome {
    Scheduled(AmortizationResult),
    /// the amortization error, as shown to the user
    Failed { error: String },
}

/// single-debt payoff projection inside a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub debt_id: DebtId,
    pub name: String,
    pub payment: Money,
    pub outcome: ProjectionOutcome,
}

impl Projection {
    pub fn schedule(&self) -> Option<&AmortizationResult> {
        match &self.outcome {
            ProjectionOutcome::Scheduled(result) => Some(result),
            ProjectionOutcome::Failed { .. } => None,
        }
    }
}

/// serializable snapshot of a full planning pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub start_date: NaiveDate,
    pub config: PlanConfig,
    pub overview: PortfolioOverview,
    pub ranked: Vec<RankedDebt>,
    pub strategy_order: Vec<OrderedDebt>,
    pub plan: MonthlyPlan,
    pub required_total: Money,
    pub extra_total: Money,
    pub all_in_total: Money,
    pub projections: Vec<Projection>,
    pub recommendations: Vec<Recommendation>,
}

impl PlanReport {
    pub fn projection_for(&self, id: &DebtId) -> Option<&Projection> {
        self.projections.iter().find(|p| &p.debt_id == id)
    }

    pub fn failed_projections(&self) -> impl Iterator<Item = &Projection> {
        self.projections
            .iter()
            .filter(|p| matches!(p.outcome, ProjectionOutcome::Failed { .. }))
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
