//! Create/edit forms and their schema validation.
//!
//! A form is pre-populated from a record, edited, validated, then applied back
//! onto the record it came from. Validation errors are collected per field so
//! the screen can render them inline; nothing reaches the store until the form
//! validates.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::entities::{
    Company, CompanyStatus, Deal, DealStatus, Lead, LeadStatus, MemberStatus, TeamMember, Ticket,
    TicketPriority, TicketStatus, Usage,
};
use crate::error::ConsoleError;
use crate::roles::ClientRole;
use crate::store::Entity;
use crate::view::parse_date;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex"))
}

fn scope_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z_]+:(read|write)$").expect("scope regex"))
}

/// Validation messages keyed by form field name (camelCase, as rendered).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), ConsoleError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConsoleError::Validation(self))
        }
    }

    fn require(&mut self, field: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
        }
    }

    fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Email is required");
        } else if !email_re().is_match(value.trim()) {
            self.add(field, "Enter a valid email address");
        }
    }

    fn date(&mut self, field: &str, value: &str) {
        if parse_date(value).is_none() {
            self.add(field, "Enter a valid date");
        }
    }

    fn percent(&mut self, field: &str, value: u8) {
        if value > 100 {
            self.add(field, "Must be between 0 and 100");
        }
    }

    fn amount(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.add(field, "Amount must be zero or more");
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A form that edits an existing record of type `Self::Record`.
pub trait EditForm: Sized {
    type Record: Entity + PartialEq;

    /// Pre-populate the form from `record`.
    fn from_record(record: &Self::Record) -> Self;

    fn validate(&self) -> FieldErrors;

    /// Overlay the form onto `base`. Fields the form does not cover are kept.
    fn apply_to(&self, base: &Self::Record, now: &str) -> Self::Record;

    /// Build a brand-new record from the form.
    fn build(&self, id: String, now: &str) -> Self::Record;
}

/// Validate `form` and apply it to `base`.
///
/// An unchanged form yields a record equal to `base`.
pub fn submit_edit<F: EditForm>(
    form: &F,
    base: &F::Record,
    now: &str,
) -> Result<F::Record, ConsoleError> {
    form.validate().into_result()?;
    Ok(form.apply_to(base, now))
}

pub fn submit_create<F: EditForm>(
    form: &F,
    id: String,
    now: &str,
) -> Result<F::Record, ConsoleError> {
    form.validate().into_result()?;
    Ok(form.build(id, now))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyForm {
    pub name: String,
    pub industry: String,
    pub contact_email: String,
    pub website: String,
    pub status: CompanyStatus,
    pub plan: String,
    pub location: String,
    pub employees: String,
}

impl EditForm for CompanyForm {
    type Record = Company;

    fn from_record(c: &Company) -> Self {
        Self {
            name: c.name.clone(),
            industry: c.industry.clone(),
            contact_email: c.contact_email.clone(),
            website: c.website.clone(),
            status: c.status,
            plan: c.plan.clone(),
            location: c.location.clone(),
            employees: c.employees.clone(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Company name");
        errors.require("industry", &self.industry, "Industry");
        errors.email("contactEmail", &self.contact_email);
        if !self.website.is_empty() && !url_re().is_match(&self.website) {
            errors.add("website", "Enter a valid URL");
        }
        errors.require("plan", &self.plan, "Plan");
        errors
    }

    fn apply_to(&self, base: &Company, now: &str) -> Company {
        let mut next = Company {
            name: self.name.clone(),
            industry: self.industry.clone(),
            contact_email: self.contact_email.clone(),
            website: self.website.clone(),
            status: self.status,
            plan: self.plan.clone(),
            location: self.location.clone(),
            employees: self.employees.clone(),
            ..base.clone()
        };
        if next != *base {
            next.updated_at = now.to_string();
        }
        next
    }

    fn build(&self, id: String, now: &str) -> Company {
        Company {
            id,
            name: self.name.clone(),
            industry: self.industry.clone(),
            contact_email: self.contact_email.clone(),
            website: self.website.clone(),
            status: self.status,
            plan: self.plan.clone(),
            location: self.location.clone(),
            employees: self.employees.clone(),
            usage: Usage {
                users: 0,
                storage: 0.0,
                limit: 10.0,
            },
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketForm {
    pub subject: String,
    pub company: String,
    pub company_id: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Empty means unassigned.
    pub assigned_agent: String,
}

impl EditForm for TicketForm {
    type Record = Ticket;

    fn from_record(t: &Ticket) -> Self {
        Self {
            subject: t.subject.clone(),
            company: t.company.clone(),
            company_id: t.company_id.clone(),
            priority: t.priority,
            status: t.status,
            assigned_agent: t.assigned_agent.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("subject", &self.subject, "Subject");
        errors.require("companyId", &self.company_id, "Company");
        if self.subject.chars().count() > 200 {
            errors.add("subject", "Subject must be 200 characters or fewer");
        }
        errors
    }

    fn apply_to(&self, base: &Ticket, _now: &str) -> Ticket {
        let agent = self.assigned_agent.trim();
        Ticket {
            subject: self.subject.clone(),
            company: self.company.clone(),
            company_id: self.company_id.clone(),
            priority: self.priority,
            status: self.status,
            assigned_agent: (!agent.is_empty()).then(|| agent.to_string()),
            ..base.clone()
        }
    }

    fn build(&self, id: String, now: &str) -> Ticket {
        let agent = self.assigned_agent.trim();
        Ticket {
            id,
            subject: self.subject.clone(),
            company: self.company.clone(),
            company_id: self.company_id.clone(),
            priority: self.priority,
            status: self.status,
            created_at: now.to_string(),
            assigned_agent: (!agent.is_empty()).then(|| agent.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub status: LeadStatus,
    pub owner: String,
    pub score: u8,
    pub source: String,
}

impl EditForm for LeadForm {
    type Record = Lead;

    fn from_record(l: &Lead) -> Self {
        Self {
            name: l.name.clone(),
            company: l.company.clone(),
            email: l.email.clone(),
            status: l.status,
            owner: l.owner.clone(),
            score: l.score,
            source: l.source.clone(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name");
        errors.require("company", &self.company, "Company");
        errors.email("email", &self.email);
        errors.require("owner", &self.owner, "Owner");
        errors.percent("score", self.score);
        errors
    }

    fn apply_to(&self, base: &Lead, _now: &str) -> Lead {
        Lead {
            name: self.name.clone(),
            company: self.company.clone(),
            email: self.email.clone(),
            status: self.status,
            owner: self.owner.clone(),
            score: self.score,
            source: self.source.clone(),
            ..base.clone()
        }
    }

    fn build(&self, id: String, now: &str) -> Lead {
        Lead {
            id,
            name: self.name.clone(),
            company: self.company.clone(),
            email: self.email.clone(),
            status: self.status,
            owner: self.owner.clone(),
            score: self.score,
            source: self.source.clone(),
            created_at: now.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealForm {
    pub name: String,
    pub client: String,
    pub amount: f64,
    pub status: DealStatus,
    pub rep: String,
    pub probability: u8,
    pub close_date: String,
}

impl EditForm for DealForm {
    type Record = Deal;

    fn from_record(d: &Deal) -> Self {
        Self {
            name: d.name.clone(),
            client: d.client.clone(),
            amount: d.amount,
            status: d.status,
            rep: d.rep.clone(),
            probability: d.probability,
            close_date: d.close_date.clone(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Deal name");
        errors.require("client", &self.client, "Client");
        errors.amount("amount", self.amount);
        errors.percent("probability", self.probability);
        errors.date("closeDate", &self.close_date);
        errors
    }

    fn apply_to(&self, base: &Deal, _now: &str) -> Deal {
        Deal {
            name: self.name.clone(),
            client: self.client.clone(),
            amount: self.amount,
            status: self.status,
            rep: self.rep.clone(),
            probability: self.probability,
            close_date: self.close_date.clone(),
            ..base.clone()
        }
    }

    fn build(&self, id: String, _now: &str) -> Deal {
        Deal {
            id,
            name: self.name.clone(),
            client: self.client.clone(),
            amount: self.amount,
            status: self.status,
            rep: self.rep.clone(),
            probability: self.probability,
            close_date: self.close_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemberForm {
    pub name: String,
    pub email: String,
    pub role: ClientRole,
    pub status: MemberStatus,
    pub department: String,
    pub branch_id: Option<String>,
    pub manager_id: Option<String>,
}

impl EditForm for TeamMemberForm {
    type Record = TeamMember;

    fn from_record(m: &TeamMember) -> Self {
        Self {
            name: m.name.clone(),
            email: m.email.clone(),
            role: m.role,
            status: m.status,
            department: m.department.clone(),
            branch_id: m.branch_id.clone(),
            manager_id: m.manager_id.clone(),
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name");
        errors.email("email", &self.email);
        errors.require("department", &self.department, "Department");
        if self.role == ClientRole::Owner && self.manager_id.is_some() {
            errors.add("managerId", "The owner does not report to anyone");
        }
        errors
    }

    fn apply_to(&self, base: &TeamMember, _now: &str) -> TeamMember {
        TeamMember {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            department: self.department.clone(),
            branch_id: self.branch_id.clone(),
            manager_id: self.manager_id.clone(),
            ..base.clone()
        }
    }

    fn build(&self, id: String, _now: &str) -> TeamMember {
        TeamMember {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            department: self.department.clone(),
            branch_id: self.branch_id.clone(),
            manager_id: self.manager_id.clone(),
            last_login: None,
        }
    }
}

/// The "create API token" dialog. Tokens are never edited, only revoked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiTokenForm {
    pub name: String,
    pub scopes: Vec<String>,
    pub expires_at: Option<String>,
}

impl ApiTokenForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Token name");
        if self.scopes.is_empty() {
            errors.add("scopes", "Pick at least one scope");
        } else if let Some(bad) = self.scopes.iter().find(|s| !scope_re().is_match(s)) {
            errors.add("scopes", format!("Unknown scope: {bad}"));
        }
        if let Some(expires) = &self.expires_at {
            errors.date("expiresAt", expires);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn test_unchanged_edit_round_trips() {
        for company in seed::companies() {
            let form = CompanyForm::from_record(&company);
            let saved = submit_edit(&form, &company, "2030-01-01").unwrap();
            assert_eq!(saved, company);
        }
        for ticket in seed::tickets() {
            let form = TicketForm::from_record(&ticket);
            assert_eq!(submit_edit(&form, &ticket, "2030-01-01").unwrap(), ticket);
        }
        for lead in seed::leads() {
            let form = LeadForm::from_record(&lead);
            assert_eq!(submit_edit(&form, &lead, "2030-01-01").unwrap(), lead);
        }
        for deal in seed::deals() {
            let form = DealForm::from_record(&deal);
            assert_eq!(submit_edit(&form, &deal, "2030-01-01").unwrap(), deal);
        }
        for member in seed::team_members() {
            let form = TeamMemberForm::from_record(&member);
            assert_eq!(submit_edit(&form, &member, "2030-01-01").unwrap(), member);
        }
    }

    #[test]
    fn test_changed_company_stamps_updated_at() {
        let company = seed::companies().remove(0);
        let mut form = CompanyForm::from_record(&company);
        form.plan = "Pro".into();
        let saved = submit_edit(&form, &company, "2030-01-01").unwrap();
        assert_eq!(saved.plan, "Pro");
        assert_eq!(saved.updated_at, "2030-01-01");
        assert_eq!(saved.created_at, company.created_at);
    }

    #[test]
    fn test_validation_collects_inline_errors() {
        let lead = seed::leads().remove(0);
        let mut form = LeadForm::from_record(&lead);
        form.name = "  ".into();
        form.email = "not-an-email".into();
        form.score = 140;
        let err = submit_edit(&form, &lead, "2030-01-01").unwrap_err();
        assert!(err.is_inline());
        match err {
            ConsoleError::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors.get("name"), Some("Name is required"));
                assert_eq!(errors.get("email"), Some("Enter a valid email address"));
                assert!(errors.get("score").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_deal_close_date_accepts_unpadded() {
        let deal = seed::deals().remove(0);
        let mut form = DealForm::from_record(&deal);
        form.close_date = "2024-2-1".into();
        assert!(form.validate().is_empty());
        form.close_date = "someday".into();
        form.amount = -5.0;
        let errors = form.validate();
        assert!(errors.get("closeDate").is_some());
        assert!(errors.get("amount").is_some());
    }

    #[test]
    fn test_ticket_blank_agent_is_unassigned() {
        let form = TicketForm {
            subject: "Printer on fire".into(),
            company: "Acme Corp".into(),
            company_id: "cmp-001".into(),
            priority: TicketPriority::High,
            status: TicketStatus::Open,
            assigned_agent: "   ".into(),
        };
        let ticket = submit_create(&form, "TCK-100".into(), "2024-06-01").unwrap();
        assert_eq!(ticket.assigned_agent, None);
        assert_eq!(ticket.created_at, "2024-06-01");
    }

    #[test]
    fn test_token_form_scopes() {
        let mut form = ApiTokenForm {
            name: "CI".into(),
            scopes: vec![],
            expires_at: None,
        };
        assert_eq!(form.validate().get("scopes"), Some("Pick at least one scope"));
        form.scopes = vec!["billing:read".into(), "everything".into()];
        assert_eq!(form.validate().get("scopes"), Some("Unknown scope: everything"));
        form.scopes.pop();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_field_errors_display_is_sorted() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required");
        errors.add("email", "Enter a valid email address");
        errors.add("name", "ignored");
        assert_eq!(
            errors.to_string(),
            "email: Enter a valid email address; name: Name is required"
        );
    }
}
