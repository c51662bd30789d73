//! Explicitly owned in-memory store behind the mock server actions.
//!
//! One `MockStore` per session, passed to whoever needs it. There is no
//! module-level mutable state; every collection carries a revision counter
//! that views use to know when to recompute.

pub mod seed;

use serde::Serialize;

use crate::entities::{
    ApiToken, Branch, Company, Deal, Lead, Product, TeamMember, Ticket, Transaction, User,
};
use crate::error::ConsoleError;
use crate::view::Record;

/// A record type that lives in the store.
pub trait Entity: Record + Clone + Serialize + Send + Sync + 'static {
    /// Human-readable name used in messages ("Company not found: c-1").
    const KIND: &'static str;

    fn collection(store: &MockStore) -> &Collection<Self>;

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self>;
}

/// An ordered collection of records with a revision counter.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    rows: Vec<T>,
    revision: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            revision: 0,
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows, revision: 0 }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.record_id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a new record at the top of the list.
    pub fn insert(&mut self, row: T) -> Result<(), ConsoleError> {
        if self.contains(row.record_id()) {
            return Err(ConsoleError::Duplicate {
                entity: T::KIND,
                id: row.record_id().to_string(),
            });
        }
        self.rows.insert(0, row);
        self.bump();
        Ok(())
    }

    /// Replace the record with the same id in place. Returns the previous value.
    pub fn replace(&mut self, row: T) -> Result<T, ConsoleError> {
        let pos = self.position(row.record_id())?;
        let old = std::mem::replace(&mut self.rows[pos], row);
        self.bump();
        Ok(old)
    }

    pub fn remove(&mut self, id: &str) -> Result<T, ConsoleError> {
        let pos = self.position(id)?;
        let old = self.rows.remove(pos);
        self.bump();
        Ok(old)
    }

    fn position(&self, id: &str) -> Result<usize, ConsoleError> {
        self.rows
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or_else(|| ConsoleError::NotFound {
                entity: T::KIND,
                id: id.to_string(),
            })
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

/// Every collection of both consoles.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    pub companies: Collection<Company>,
    pub transactions: Collection<Transaction>,
    pub tickets: Collection<Ticket>,
    pub users: Collection<User>,
    pub tokens: Collection<ApiToken>,
    pub team_members: Collection<TeamMember>,
    pub leads: Collection<Lead>,
    pub deals: Collection<Deal>,
    pub products: Collection<Product>,
    pub branches: Collection<Branch>,
}

impl MockStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo data set.
    pub fn seeded() -> Self {
        seed::demo_store()
    }

    pub fn of<T: Entity>(&self) -> &Collection<T> {
        T::collection(self)
    }

    pub fn of_mut<T: Entity>(&mut self) -> &mut Collection<T> {
        T::collection_mut(self)
    }
}

impl Entity for Company {
    const KIND: &'static str = "Company";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.companies
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.companies
    }
}

impl Entity for Transaction {
    const KIND: &'static str = "Transaction";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.transactions
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.transactions
    }
}

impl Entity for Ticket {
    const KIND: &'static str = "Ticket";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.tickets
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.tickets
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.users
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.users
    }
}

impl Entity for ApiToken {
    const KIND: &'static str = "API token";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.tokens
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.tokens
    }
}

impl Entity for TeamMember {
    const KIND: &'static str = "Team member";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.team_members
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.team_members
    }
}

impl Entity for Lead {
    const KIND: &'static str = "Lead";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.leads
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.leads
    }
}

impl Entity for Deal {
    const KIND: &'static str = "Deal";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.deals
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.deals
    }
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.products
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.products
    }
}

impl Entity for Branch {
    const KIND: &'static str = "Branch";

    fn collection(store: &MockStore) -> &Collection<Self> {
        &store.branches
    }

    fn collection_mut(store: &mut MockStore) -> &mut Collection<Self> {
        &mut store.branches
    }
}
