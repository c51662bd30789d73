//! Entity shapes shown by the admin console and the client CRM.
//!
//! Relationships are denormalized string ids (`companyId` on tickets and
//! transactions) with no referential checks. Timestamps are kept as the
//! strings the screens display; the view engine parses them on demand.

pub mod company;
pub mod deal;
pub mod lead;
pub mod product;
pub mod ticket;
pub mod token;
pub mod transaction;
pub mod user;

pub use company::{Company, CompanyStatus, Usage};
pub use deal::{Deal, DealStatus};
pub use lead::{Lead, LeadStatus};
pub use product::{Branch, BranchStatus, Product, ProductStatus};
pub use ticket::{Ticket, TicketPriority, TicketStatus};
pub use token::{ApiToken, TokenStatus};
pub use transaction::{Transaction, TransactionStatus};
pub use user::{MemberStatus, TeamMember, User, UserStatus};
