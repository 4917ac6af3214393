//! Dashboard aggregates over campaign history

use std::sync::Arc;

use super::{CampaignHistory, CampaignHistoryError, CampaignSummary};

/// Totals shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Number of campaigns
    pub campaigns: usize,

    /// Recipients delivered to
    pub sent: usize,

    /// Recipients that failed
    pub failed: usize,

    /// Recipients targeted
    pub total: usize,
}

impl DashboardStats {
    /// Aggregates `campaigns`
    pub fn from_campaigns(campaigns: &[CampaignSummary]) -> Self {
        campaigns.iter().fold(Self::default(), |stats, campaign| Self {
            campaigns: stats.campaigns + 1,
            sent: stats.sent + campaign.success_count,
            failed: stats.failed + campaign.failed_count,
            total: stats.total + campaign.recipient_count(),
        })
    }

    /// Loads the history and aggregates it
    pub async fn load<H: CampaignHistory>(history: Arc<H>) -> Result<Self, CampaignHistoryError> {
        let campaigns = history.recent_campaigns().await?;

        Ok(Self::from_campaigns(&campaigns))
    }

    /// Delivered share of attempted sends, as a whole percentage
    pub fn success_rate(&self) -> u8 {
        let attempted = self.sent + self.failed;

        if attempted == 0 {
            return 0;
        }

        ((self.sent as f64 / attempted as f64) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::domain::campaigns::tests::MockCampaignHistory;

    fn campaign(sent: usize, failed: usize) -> CampaignSummary {
        CampaignSummary {
            success_count: sent,
            failed_count: failed,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate() {
        let stats = DashboardStats::from_campaigns(&[campaign(3, 1), campaign(5, 0)]);

        assert_eq!(
            stats,
            DashboardStats {
                campaigns: 2,
                sent: 8,
                failed: 1,
                total: 9,
            }
        );
        assert_eq!(stats.success_rate(), 89);
    }

    #[test]
    fn test_success_rate_with_nothing_sent() {
        assert_eq!(DashboardStats::default().success_rate(), 0);
    }

    #[tokio::test]
    async fn test_load_from_history() -> TestResult {
        let mut history = MockCampaignHistory::new();

        history
            .expect_recent_campaigns()
            .times(1)
            .returning(|| Ok(vec![campaign(1, 1)]));

        let stats = DashboardStats::load(Arc::new(history)).await?;

        assert_eq!(stats.success_rate(), 50);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_propagates_errors() {
        let mut history = MockCampaignHistory::new();

        history
            .expect_recent_campaigns()
            .times(1)
            .returning(|| Err(CampaignHistoryError::Unavailable));

        let result = DashboardStats::load(Arc::new(history)).await;

        assert!(matches!(result, Err(CampaignHistoryError::Unavailable)));
    }
}
