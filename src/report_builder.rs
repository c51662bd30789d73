//! Report builder wizard.
//!
//! A fixed, ordered list of steps: Source → Columns → Filters → Review.
//! Moving forward validates the current step; moving back never validates and
//! keeps whatever was entered. A report can only be finished from Review.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{Company, Deal, Lead, Product, TeamMember, Ticket, Transaction, User};
use crate::store::{Entity, MockStore};
use crate::view::{is_date_key, project, Criteria, DateRange, FieldValue, FilterValue, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStep {
    #[default]
    Source,
    Columns,
    Filters,
    Review,
}

impl ReportStep {
    pub const ORDER: [ReportStep; 4] = [
        ReportStep::Source,
        ReportStep::Columns,
        ReportStep::Filters,
        ReportStep::Review,
    ];

    /// Zero-based position, for the step indicator.
    pub fn index(self) -> usize {
        match self {
            ReportStep::Source => 0,
            ReportStep::Columns => 1,
            ReportStep::Filters => 2,
            ReportStep::Review => 3,
        }
    }

    fn next(self) -> Option<ReportStep> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<ReportStep> {
        self.index().checked_sub(1).map(|i| Self::ORDER[i])
    }
}

impl fmt::Display for ReportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStep::Source => write!(f, "Choose source"),
            ReportStep::Columns => write!(f, "Pick columns"),
            ReportStep::Filters => write!(f, "Filters"),
            ReportStep::Review => write!(f, "Review"),
        }
    }
}

/// Collections a report can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportSource {
    Companies,
    Transactions,
    Tickets,
    Users,
    TeamMembers,
    Leads,
    Deals,
    Products,
}

impl ReportSource {
    pub fn label(self) -> &'static str {
        match self {
            ReportSource::Companies => "Companies",
            ReportSource::Transactions => "Transactions",
            ReportSource::Tickets => "Support tickets",
            ReportSource::Users => "Users",
            ReportSource::TeamMembers => "Team members",
            ReportSource::Leads => "Leads",
            ReportSource::Deals => "Deals",
            ReportSource::Products => "Products",
        }
    }

    /// Columns offered for this source, in picker order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportSource::Companies => &[
                "name", "industry", "status", "plan", "location", "employees",
                "usage.users", "usage.storage", "usage.limit", "createdAt", "updatedAt",
            ],
            ReportSource::Transactions => &[
                "invoice", "company", "amount", "status", "date", "nextBillingDate",
                "paymentMethod", "plan",
            ],
            ReportSource::Tickets => &[
                "id", "subject", "company", "priority", "status", "createdAt", "assignedAgent",
            ],
            ReportSource::Users => &["name", "email", "role", "status", "company", "lastLogin"],
            ReportSource::TeamMembers => &[
                "name", "email", "role", "status", "department", "branchId", "lastLogin",
            ],
            ReportSource::Leads => &[
                "name", "company", "email", "status", "owner", "score", "source", "createdAt",
            ],
            ReportSource::Deals => &[
                "name", "client", "amount", "status", "rep", "probability", "closeDate",
            ],
            ReportSource::Products => &[
                "name", "sku", "category", "price", "stock", "status", "updatedAt",
            ],
        }
    }

    fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Pick a data source")]
    NoSource,
    #[error("Pick at least one column")]
    NoColumns,
    #[error("{collection} has no column {column}")]
    UnknownColumn {
        collection: &'static str,
        column: String,
    },
    #[error("{0} is not a date column")]
    NotADateColumn(String),
    #[error("The start date is after the end date")]
    InvertedDateRange,
    #[error("Give the report a name")]
    NoName,
    #[error("Already on the first step")]
    AtFirstStep,
    #[error("Already on the last step")]
    AtLastStep,
    #[error("Reports can only be finished from the review step")]
    NotAtReview,
}

/// Everything entered so far. Fields may be incomplete until Review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub name: String,
    pub source: Option<ReportSource>,
    pub columns: Vec<String>,
    pub criteria: Criteria,
    pub sort: Option<SortState>,
}

/// A finished, validated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub name: String,
    pub source: ReportSource,
    pub columns: Vec<String>,
    pub criteria: Criteria,
    pub sort: Option<SortState>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportWizard {
    step: ReportStep,
    draft: ReportDraft,
}

impl ReportWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ReportStep {
        self.step
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    /// Changing the source drops columns and filters that belonged to the old one.
    pub fn set_source(&mut self, source: ReportSource) {
        if self.draft.source != Some(source) {
            self.draft.columns.clear();
            self.draft.criteria = Criteria::default();
            self.draft.sort = None;
        }
        self.draft.source = Some(source);
    }

    pub fn toggle_column(&mut self, column: &str) {
        if let Some(pos) = self.draft.columns.iter().position(|c| c == column) {
            self.draft.columns.remove(pos);
        } else {
            self.draft.columns.push(column.to_string());
        }
    }

    pub fn set_filter(&mut self, field: &str, value: impl Into<FilterValue>) {
        self.draft
            .criteria
            .equality_filters
            .insert(field.to_string(), value.into());
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.draft.criteria.date_range = range;
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.draft.sort = sort;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Validate the current step and move to the next one.
    pub fn next(&mut self) -> Result<ReportStep, WizardError> {
        let step = self.step();
        let to = step.next().ok_or(WizardError::AtLastStep)?;
        self.validate_step(step)?;
        self.step = to;
        Ok(to)
    }

    /// Move to the previous step without validating anything.
    pub fn back(&mut self) -> Result<ReportStep, WizardError> {
        let to = self.step().prev().ok_or(WizardError::AtFirstStep)?;
        self.step = to;
        Ok(to)
    }

    pub fn finish(&self) -> Result<ReportDefinition, WizardError> {
        if self.step() != ReportStep::Review {
            return Err(WizardError::NotAtReview);
        }
        for step in ReportStep::ORDER {
            self.validate_step(step)?;
        }
        let source = self.draft.source.ok_or(WizardError::NoSource)?;
        Ok(ReportDefinition {
            name: self.draft.name.trim().to_string(),
            source,
            columns: self.draft.columns.clone(),
            criteria: self.draft.criteria.clone(),
            sort: self.draft.sort.clone(),
        })
    }

    fn validate_step(&self, step: ReportStep) -> Result<(), WizardError> {
        let draft = &self.draft;
        let source = draft.source.ok_or(WizardError::NoSource)?;
        let known = |column: &str| {
            if source.has_column(column) {
                Ok(())
            } else {
                Err(WizardError::UnknownColumn {
                    collection: source.label(),
                    column: column.to_string(),
                })
            }
        };
        match step {
            ReportStep::Source => Ok(()),
            ReportStep::Columns => {
                if draft.columns.is_empty() {
                    return Err(WizardError::NoColumns);
                }
                draft.columns.iter().try_for_each(|c| known(c.as_str()))
            }
            ReportStep::Filters => {
                draft
                    .criteria
                    .equality_filters
                    .keys()
                    .try_for_each(|c| known(c.as_str()))?;
                if let Some(sort) = &draft.sort {
                    known(&sort.key)?;
                }
                if let Some(range) = &draft.criteria.date_range {
                    known(&range.field)?;
                    if !is_date_key(&range.field) {
                        return Err(WizardError::NotADateColumn(range.field.clone()));
                    }
                    if let (Some(from), Some(to)) = (range.from, range.to) {
                        if from > to {
                            return Err(WizardError::InvertedDateRange);
                        }
                    }
                }
                Ok(())
            }
            ReportStep::Review => {
                if draft.name.trim().is_empty() {
                    return Err(WizardError::NoName);
                }
                Ok(())
            }
        }
    }
}

/// Rows of a report, one value per chosen column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}

pub fn run_report(store: &MockStore, report: &ReportDefinition) -> ReportOutput {
    let rows = match report.source {
        ReportSource::Companies => tabulate::<Company>(store, report),
        ReportSource::Transactions => tabulate::<Transaction>(store, report),
        ReportSource::Tickets => tabulate::<Ticket>(store, report),
        ReportSource::Users => tabulate::<User>(store, report),
        ReportSource::TeamMembers => tabulate::<TeamMember>(store, report),
        ReportSource::Leads => tabulate::<Lead>(store, report),
        ReportSource::Deals => tabulate::<Deal>(store, report),
        ReportSource::Products => tabulate::<Product>(store, report),
    };
    log::debug!("Report '{}' produced {} rows", report.name, rows.len());
    ReportOutput {
        name: report.name.clone(),
        columns: report.columns.clone(),
        rows,
    }
}

fn tabulate<T: Entity>(store: &MockStore, report: &ReportDefinition) -> Vec<Vec<FieldValue>> {
    project(store.of::<T>().rows(), &report.criteria, report.sort.as_ref())
        .into_iter()
        .map(|record| report.columns.iter().map(|c| record.field(c)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wizard_at_review() -> ReportWizard {
        let mut w = ReportWizard::new();
        w.set_source(ReportSource::Tickets);
        w.next().unwrap();
        w.toggle_column("id");
        w.toggle_column("priority");
        w.next().unwrap();
        w.set_filter("status", "Open");
        w.set_sort(Some(SortState::asc("priority")));
        w.next().unwrap();
        w.set_name("Open tickets");
        w
    }

    #[test]
    fn test_forward_requires_valid_step() {
        let mut w = ReportWizard::new();
        assert_eq!(w.next(), Err(WizardError::NoSource));
        assert_eq!(w.step(), ReportStep::Source);
        w.set_source(ReportSource::Leads);
        assert_eq!(w.next(), Ok(ReportStep::Columns));
        assert_eq!(w.next(), Err(WizardError::NoColumns));
        w.toggle_column("balance");
        assert!(matches!(w.next(), Err(WizardError::UnknownColumn { .. })));
        w.toggle_column("balance");
        w.toggle_column("name");
        assert_eq!(w.next(), Ok(ReportStep::Filters));
    }

    #[test]
    fn test_back_never_validates_and_keeps_draft() {
        let mut w = wizard_at_review();
        w.set_name("");
        assert_eq!(w.back(), Ok(ReportStep::Filters));
        assert_eq!(w.back(), Ok(ReportStep::Columns));
        assert_eq!(w.back(), Ok(ReportStep::Source));
        assert_eq!(w.back(), Err(WizardError::AtFirstStep));
        assert_eq!(w.draft().columns, vec!["id", "priority"]);
    }

    #[test]
    fn test_finish_only_from_review() {
        let mut w = wizard_at_review();
        w.back().unwrap();
        assert_eq!(w.finish(), Err(WizardError::NotAtReview));
        w.next().unwrap();
        let report = w.finish().unwrap();
        assert_eq!(report.source, ReportSource::Tickets);
        assert_eq!(w.next(), Err(WizardError::AtLastStep));

        w.set_name("   ");
        assert_eq!(w.finish(), Err(WizardError::NoName));
    }

    #[test]
    fn test_date_range_must_target_date_column() {
        let mut w = ReportWizard::new();
        w.set_source(ReportSource::Deals);
        w.next().unwrap();
        w.toggle_column("name");
        w.next().unwrap();
        w.set_date_range(Some(DateRange::days("amount", None, None)));
        assert_eq!(w.next(), Err(WizardError::NotADateColumn("amount".into())));
        w.set_date_range(Some(DateRange::days(
            "closeDate",
            NaiveDate::from_ymd_opt(2024, 9, 1),
            NaiveDate::from_ymd_opt(2024, 1, 1),
        )));
        assert_eq!(w.next(), Err(WizardError::InvertedDateRange));
    }

    #[test]
    fn test_changing_source_resets_columns() {
        let mut w = ReportWizard::new();
        w.set_source(ReportSource::Leads);
        w.toggle_column("score");
        w.set_source(ReportSource::Leads);
        assert_eq!(w.draft().columns.len(), 1);
        w.set_source(ReportSource::Deals);
        assert!(w.draft().columns.is_empty());
    }

    #[test]
    fn test_run_report_projects_source() {
        let report = wizard_at_review().finish().unwrap();
        let output = run_report(&MockStore::seeded(), &report);
        assert_eq!(output.columns, vec!["id", "priority"]);
        let ids: Vec<FieldValue> = output.rows.iter().map(|r| r[0].clone()).collect();
        // "High" < "Medium" as text; ties keep seed order.
        assert_eq!(
            ids,
            vec![
                FieldValue::text("TCK-001"),
                FieldValue::text("TCK-004"),
                FieldValue::text("TCK-007"),
            ]
        );
    }
}
