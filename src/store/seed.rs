//! Demo data set loaded into a fresh store.

use crate::entities::{
    ApiToken, Branch, BranchStatus, Company, CompanyStatus, Deal, DealStatus, Lead, LeadStatus,
    MemberStatus, Product, ProductStatus, TeamMember, Ticket, TicketPriority, TicketStatus,
    TokenStatus, Transaction, TransactionStatus, Usage, User, UserStatus,
};
use crate::roles::{AdminRole, ClientRole};

use super::{Collection, MockStore};

pub fn demo_store() -> MockStore {
    MockStore {
        companies: Collection::new(companies()),
        transactions: Collection::new(transactions()),
        tickets: Collection::new(tickets()),
        users: Collection::new(users()),
        tokens: Collection::new(tokens()),
        team_members: Collection::new(team_members()),
        leads: Collection::new(leads()),
        deals: Collection::new(deals()),
        products: Collection::new(products()),
        branches: Collection::new(branches()),
    }
}

#[allow(clippy::too_many_arguments)]
fn company(
    id: &str,
    name: &str,
    industry: &str,
    status: CompanyStatus,
    plan: &str,
    location: &str,
    employees: &str,
    usage: (u32, f64, f64),
    created_at: &str,
) -> Company {
    let domain = crate::util::slugify(name).replace('-', "");
    Company {
        id: id.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        contact_email: format!("admin@{domain}.com"),
        website: format!("https://{domain}.com"),
        status,
        plan: plan.to_string(),
        location: location.to_string(),
        employees: employees.to_string(),
        usage: Usage {
            users: usage.0,
            storage: usage.1,
            limit: usage.2,
        },
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
    }
}

#[rustfmt::skip]
pub fn companies() -> Vec<Company> {
    use CompanyStatus::*;
    vec![
        company("cmp-001", "Acme Corp", "Manufacturing", Active, "Enterprise", "Chicago, IL", "201-500", (148, 420.5, 500.0), "2023-01-15"),
        company("cmp-002", "Globex", "Technology", Active, "Pro", "Austin, TX", "51-200", (62, 88.0, 100.0), "2023-03-02"),
        company("cmp-003", "Initech", "Finance", Trial, "Starter", "Boston, MA", "11-50", (9, 2.4, 10.0), "2024-2-1"),
        company("cmp-004", "Umbrella Health", "Healthcare", Suspended, "Pro", "Denver, CO", "51-200", (40, 104.0, 100.0), "2023-07-19"),
        company("cmp-005", "Stark Logistics", "Logistics", Active, "Enterprise", "Seattle, WA", "501-1000", (310, 760.0, 1000.0), "2022-11-08"),
        company("cmp-006", "Wayne Retail", "Retail", Trial, "Starter", "Miami, FL", "1-10", (4, 0.8, 10.0), "2024-10-1"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn transaction(
    invoice: &str,
    company: &str,
    company_id: &str,
    amount: f64,
    status: TransactionStatus,
    date: &str,
    next_billing_date: &str,
    payment_method: &str,
    plan: &str,
) -> Transaction {
    Transaction {
        invoice: invoice.to_string(),
        company: company.to_string(),
        company_id: company_id.to_string(),
        amount,
        status,
        date: date.to_string(),
        next_billing_date: next_billing_date.to_string(),
        payment_method: payment_method.to_string(),
        plan: plan.to_string(),
    }
}

#[rustfmt::skip]
pub fn transactions() -> Vec<Transaction> {
    use TransactionStatus::*;
    vec![
        transaction("INV-1001", "Acme Corp", "cmp-001", 2499.0, Paid, "2024-05-01", "2024-06-01", "Visa •••• 4242", "Enterprise"),
        transaction("INV-1002", "Globex", "cmp-002", 499.0, Paid, "2024-05-03", "2024-06-03", "Mastercard •••• 5100", "Pro"),
        transaction("INV-1003", "Initech", "cmp-003", 0.0, Pending, "2024-05-04", "2024-06-04", "Invoice", "Starter"),
        transaction("INV-1004", "Umbrella Health", "cmp-004", 499.0, Failed, "2024-05-05", "2024-05-12", "Visa •••• 1881", "Pro"),
        transaction("INV-1005", "Stark Logistics", "cmp-005", 2499.0, Paid, "2024-05-08", "2024-06-08", "ACH", "Enterprise"),
        transaction("INV-1006", "Globex", "cmp-002", 499.0, Refunded, "2024-04-03", "2024-05-03", "Mastercard •••• 5100", "Pro"),
        transaction("INV-1007", "Acme Corp", "cmp-001", 2499.0, Paid, "2024-04-01", "2024-05-01", "Visa •••• 4242", "Enterprise"),
        transaction("INV-1008", "Wayne Retail", "cmp-006", 49.0, Pending, "2024-05-10", "2024-06-10", "Invoice", "Starter"),
    ]
}

fn ticket(
    id: &str,
    subject: &str,
    company: (&str, &str),
    priority: TicketPriority,
    status: TicketStatus,
    created_at: &str,
    assigned_agent: Option<&str>,
) -> Ticket {
    Ticket {
        id: id.to_string(),
        subject: subject.to_string(),
        company: company.0.to_string(),
        company_id: company.1.to_string(),
        priority,
        status,
        created_at: created_at.to_string(),
        assigned_agent: assigned_agent.map(String::from),
    }
}

#[rustfmt::skip]
pub fn tickets() -> Vec<Ticket> {
    use TicketPriority::*;
    use TicketStatus::*;
    let acme = ("Acme Corp", "cmp-001");
    let globex = ("Globex", "cmp-002");
    let initech = ("Initech", "cmp-003");
    let umbrella = ("Umbrella Health", "cmp-004");
    let stark = ("Stark Logistics", "cmp-005");
    vec![
        ticket("TCK-001", "Cannot export invoices to CSV", acme, High, Open, "2024-05-12", None),
        ticket("TCK-002", "SSO login loop after password reset", globex, High, InProgress, "2024-05-11", Some("Priya Shah")),
        ticket("TCK-003", "Question about storage limits", initech, Low, Resolved, "2024-05-09", Some("Marco Diaz")),
        ticket("TCK-004", "Account suspended unexpectedly", umbrella, High, Open, "2024-05-13", Some("Priya Shah")),
        ticket("TCK-005", "Webhook retries not firing", stark, Medium, InProgress, "2024-05-08", Some("Marco Diaz")),
        ticket("TCK-006", "Add second billing contact", acme, Low, Closed, "2024-04-28", Some("Priya Shah")),
        ticket("TCK-007", "Dashboard charts load slowly", globex, Medium, Open, "2024-05-14", None),
        ticket("TCK-008", "Trial extension request", initech, Medium, Closed, "2024-04-30", Some("Marco Diaz")),
    ]
}

#[rustfmt::skip]
pub fn users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role, status, last_login: Option<&str>| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        company: "CRMDesk".to_string(),
        last_login: last_login.map(String::from),
    };
    vec![
        user("usr-001", "Alex Morgan", "alex@crmdesk.io", AdminRole::SuperAdmin, UserStatus::Active, Some("2024-05-14T08:30:00Z")),
        user("usr-002", "Priya Shah", "priya@crmdesk.io", AdminRole::Support, UserStatus::Active, Some("2024-05-14T09:12:00Z")),
        user("usr-003", "Marco Diaz", "marco@crmdesk.io", AdminRole::Support, UserStatus::Active, Some("2024-05-13T16:45:00Z")),
        user("usr-004", "Hannah Lee", "hannah@crmdesk.io", AdminRole::Billing, UserStatus::Inactive, Some("2024-03-02T11:00:00Z")),
        user("usr-005", "Tom Becker", "tom@crmdesk.io", AdminRole::Analyst, UserStatus::Invited, None),
    ]
}

#[rustfmt::skip]
pub fn tokens() -> Vec<ApiToken> {
    vec![
        ApiToken {
            id: "tok-001".to_string(),
            name: "Billing sync".to_string(),
            prefix: "cd_3fa9c1e2".to_string(),
            secret_hash: "3c5a0f3a86b6e0e3c40d0a3e94c5b3f1d5d4e0b0a8e2d3f1c9b7a6e5d4c3b2a1".to_string(),
            scopes: vec!["billing:read".to_string()],
            status: TokenStatus::Active,
            created_at: "2024-01-10".to_string(),
            last_used: Some("2024-05-13T22:10:00Z".to_string()),
            expires_at: None,
        },
        ApiToken {
            id: "tok-002".to_string(),
            name: "Legacy import".to_string(),
            prefix: "cd_91b0d7aa".to_string(),
            secret_hash: "9f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0".to_string(),
            scopes: vec!["companies:write".to_string(), "users:read".to_string()],
            status: TokenStatus::Revoked,
            created_at: "2023-06-01".to_string(),
            last_used: Some("2023-12-20T10:00:00Z".to_string()),
            expires_at: Some("2024-06-01".to_string()),
        },
    ]
}

#[rustfmt::skip]
pub fn team_members() -> Vec<TeamMember> {
    let member = |id: &str, name: &str, role, status, branch: &str, manager: Option<&str>| TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@northwind.test", crate::util::slugify(name).replace('-', ".")),
        role,
        status,
        department: "Sales".to_string(),
        branch_id: Some(branch.to_string()),
        manager_id: manager.map(String::from),
        last_login: Some("2024-05-14".to_string()),
    };
    vec![
        member("tm-001", "Olivia Park", ClientRole::Owner, MemberStatus::Active, "br-001", None),
        member("tm-002", "Ethan Cole", ClientRole::Admin, MemberStatus::Active, "br-001", Some("tm-001")),
        member("tm-003", "Sofia Reyes", ClientRole::Manager, MemberStatus::Active, "br-002", Some("tm-001")),
        member("tm-004", "Liam Turner", ClientRole::SalesRep, MemberStatus::Active, "br-002", Some("tm-003")),
        member("tm-005", "Ava Nguyen", ClientRole::SalesRep, MemberStatus::OnLeave, "br-002", Some("tm-003")),
        member("tm-006", "Noah Fischer", ClientRole::Viewer, MemberStatus::Inactive, "br-003", Some("tm-002")),
    ]
}

#[rustfmt::skip]
pub fn leads() -> Vec<Lead> {
    use LeadStatus::*;
    let lead = |id: &str, name: &str, company: &str, status, owner: &str, score, source: &str, created_at: &str| Lead {
        id: id.to_string(),
        name: name.to_string(),
        company: company.to_string(),
        email: format!("{}@{}.test", crate::util::slugify(name).replace('-', "."), crate::util::slugify(company)),
        status,
        owner: owner.to_string(),
        score,
        source: source.to_string(),
        created_at: created_at.to_string(),
    };
    vec![
        lead("ld-001", "Grace Kim", "Bluebird Foods", New, "Liam Turner", 35, "Website", "2024-05-10"),
        lead("ld-002", "Omar Haddad", "Crescent Labs", Contacted, "Liam Turner", 52, "Referral", "2024-05-02"),
        lead("ld-003", "Julia Rossi", "Delta Freight", Qualified, "Ava Nguyen", 71, "Trade show", "2024-04-22"),
        lead("ld-004", "Ben Carter", "Evergreen Dental", Proposal, "Sofia Reyes", 83, "Website", "2024-04-15"),
        lead("ld-005", "Mei Lin", "Foxtrot Media", Won, "Ava Nguyen", 95, "Referral", "2024-03-30"),
        lead("ld-006", "Lucas Meyer", "Granite Works", Lost, "Liam Turner", 20, "Cold call", "2024-03-18"),
        lead("ld-007", "Zara Ahmed", "Harbor Coffee", New, "Sofia Reyes", 44, "Website", "2024-05-13"),
        lead("ld-008", "Ivan Petrov", "Ion Robotics", Contacted, "Ava Nguyen", 63, "LinkedIn", "2024-05-06"),
    ]
}

#[rustfmt::skip]
pub fn deals() -> Vec<Deal> {
    use DealStatus::*;
    let deal = |id: &str, name: &str, client: &str, amount, status, rep: &str, probability, close_date: &str| Deal {
        id: id.to_string(),
        name: name.to_string(),
        client: client.to_string(),
        amount,
        status,
        rep: rep.to_string(),
        probability,
        close_date: close_date.to_string(),
    };
    vec![
        deal("dl-001", "Fleet tracking rollout", "Delta Freight", 48000.0, Negotiation, "Ava Nguyen", 60, "2024-06-30"),
        deal("dl-002", "Clinic scheduling suite", "Evergreen Dental", 18500.0, Proposal, "Sofia Reyes", 40, "2024-07-15"),
        deal("dl-003", "Annual media license", "Foxtrot Media", 32000.0, Won, "Ava Nguyen", 100, "2024-04-28"),
        deal("dl-004", "Warehouse sensors", "Granite Works", 12000.0, Lost, "Liam Turner", 0, "2024-04-10"),
        deal("dl-005", "POS upgrade", "Harbor Coffee", 6400.0, Quotation, "Sofia Reyes", 20, "2024-08-01"),
        deal("dl-006", "Robotics pilot", "Ion Robotics", 27500.0, Quotation, "Ava Nguyen", 25, "2024-09-15"),
    ]
}

#[rustfmt::skip]
pub fn products() -> Vec<Product> {
    use ProductStatus::*;
    let product = |id: &str, name: &str, sku: &str, category: &str, price, stock, status| Product {
        id: id.to_string(),
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        price,
        stock,
        status,
        updated_at: "2024-05-01".to_string(),
    };
    vec![
        product("pr-001", "Starter Seat", "SEAT-STR", "Licenses", 29.0, 1000, Active),
        product("pr-002", "Pro Seat", "SEAT-PRO", "Licenses", 59.0, 1000, Active),
        product("pr-003", "GPS Tracker", "HW-GPS-01", "Hardware", 149.0, 86, Active),
        product("pr-004", "Onboarding Package", "SVC-ONB", "Services", 1200.0, 0, Draft),
        product("pr-005", "Legacy Sensor", "HW-SNS-00", "Hardware", 89.0, 4, Archived),
    ]
}

#[rustfmt::skip]
pub fn branches() -> Vec<Branch> {
    let branch = |id: &str, name: &str, city: &str, manager: &str, members, status, opened_at: &str| Branch {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        manager: manager.to_string(),
        members,
        status,
        opened_at: opened_at.to_string(),
    };
    vec![
        branch("br-001", "Headquarters", "Portland", "Olivia Park", 2, BranchStatus::Active, "2019-03-01"),
        branch("br-002", "East Coast", "New York", "Sofia Reyes", 3, BranchStatus::Active, "2021-09-15"),
        branch("br-003", "Remote", "Anywhere", "Ethan Cole", 1, BranchStatus::Inactive, "2022-01-10"),
    ]
}
