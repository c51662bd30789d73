// Dashboard service
// Summary cards for the admin overview and the client pipeline page. Pure
// reads over a store snapshot; callers go through `MockBackend::read`.

use serde::Serialize;

use crate::entities::{
    CompanyStatus, DealStatus, LeadStatus, TicketPriority, TicketStatus, TransactionStatus,
};
use crate::store::MockStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_companies: usize,
    pub companies_by_status: Vec<StatusCount>,
    /// Tenants using more storage than their plan allows.
    pub over_limit_companies: usize,
    pub paid_revenue: f64,
    pub pending_amount: f64,
    pub failed_payments: usize,
    pub open_tickets: usize,
    /// High-priority tickets that are open or in progress.
    pub urgent_tickets: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub leads_by_status: Vec<StatusCount>,
    /// Leads not yet won or lost.
    pub open_leads: usize,
    pub open_deal_value: f64,
    pub weighted_forecast: f64,
    pub won_value: f64,
    /// Won / (won + lost) over closed deals; `None` before anything closed.
    pub win_rate: Option<f64>,
}

pub fn admin_overview(store: &MockStore) -> AdminOverview {
    let companies = store.companies.rows();
    let transactions = store.transactions.rows();
    let tickets = store.tickets.rows();

    let amount_with = |status: TransactionStatus| -> f64 {
        transactions
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.amount)
            .sum()
    };

    AdminOverview {
        total_companies: companies.len(),
        companies_by_status: CompanyStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status: status.as_str(),
                count: companies.iter().filter(|c| c.status == status).count(),
            })
            .collect(),
        over_limit_companies: companies.iter().filter(|c| c.usage.is_over_limit()).count(),
        paid_revenue: amount_with(TransactionStatus::Paid),
        pending_amount: amount_with(TransactionStatus::Pending),
        failed_payments: transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Failed)
            .count(),
        open_tickets: tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Open)
            .count(),
        urgent_tickets: tickets
            .iter()
            .filter(|t| t.priority == TicketPriority::High && t.status.is_active())
            .count(),
    }
}

pub fn pipeline_summary(store: &MockStore) -> PipelineSummary {
    let leads = store.leads.rows();
    let deals = store.deals.rows();

    let open = deals.iter().filter(|d| d.status.is_open());
    let won = deals.iter().filter(|d| d.status == DealStatus::Won).count();
    let lost = deals.iter().filter(|d| d.status == DealStatus::Lost).count();

    PipelineSummary {
        leads_by_status: LeadStatus::PIPELINE
            .iter()
            .map(|&status| StatusCount {
                status: status.as_str(),
                count: leads.iter().filter(|l| l.status == status).count(),
            })
            .collect(),
        open_leads: leads.iter().filter(|l| !l.status.is_closed()).count(),
        open_deal_value: open.clone().map(|d| d.amount).sum(),
        weighted_forecast: open.map(|d| d.weighted_amount()).sum(),
        won_value: deals
            .iter()
            .filter(|d| d.status == DealStatus::Won)
            .map(|d| d.amount)
            .sum(),
        win_rate: (won + lost > 0).then(|| won as f64 / (won + lost) as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_overview_from_seed() {
        let overview = admin_overview(&MockStore::seeded());
        assert_eq!(overview.total_companies, 6);
        assert_eq!(
            overview.companies_by_status,
            vec![
                StatusCount { status: "Active", count: 3 },
                StatusCount { status: "Trial", count: 2 },
                StatusCount { status: "Suspended", count: 1 },
            ]
        );
        assert_eq!(overview.over_limit_companies, 1);
        assert!((overview.paid_revenue - 7996.0).abs() < 1e-9);
        assert!((overview.pending_amount - 49.0).abs() < 1e-9);
        assert_eq!(overview.failed_payments, 1);
        assert_eq!(overview.open_tickets, 3);
        assert_eq!(overview.urgent_tickets, 3);
    }

    #[test]
    fn test_pipeline_summary_from_seed() {
        let summary = pipeline_summary(&MockStore::seeded());
        let counts: Vec<usize> = summary.leads_by_status.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![2, 2, 1, 1, 1, 1]);
        assert_eq!(summary.open_leads, 6);
        assert!((summary.open_deal_value - 100_400.0).abs() < 1e-9);
        assert!((summary.weighted_forecast - 44_355.0).abs() < 1e-9);
        assert!((summary.won_value - 32_000.0).abs() < 1e-9);
        assert_eq!(summary.win_rate, Some(0.5));
    }

    #[test]
    fn test_empty_store() {
        let summary = pipeline_summary(&MockStore::empty());
        assert_eq!(summary.win_rate, None);
        assert_eq!(summary.open_deal_value, 0.0);
        assert_eq!(admin_overview(&MockStore::empty()).total_companies, 0);
    }
}
