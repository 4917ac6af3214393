//! Campaign history and dashboard aggregates

mod history;
mod stats;
mod summary;

pub use history::{CampaignHistory, CampaignHistoryError};
pub use stats::DashboardStats;
pub use summary::CampaignSummary;
