pub mod priority;
pub mod strategy;

pub use priority::{priority_reason, rank_debts, PriorityKey, RankedDebt};
pub use strategy::{order_debts, StrategyKey, StrategyRank};
