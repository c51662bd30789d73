//! Kanban board over a staged pipeline (leads, deals).
//!
//! Stages are an unconstrained tagged field: a card can be dropped on any
//! column from any other, and there is no transition check.

use std::fmt::Debug;

use serde::Serialize;

use crate::backend::MockBackend;
use crate::entities::{Deal, DealStatus};
use crate::error::ConsoleError;
use crate::store::Entity;

/// A record that sits in one column of a pipeline.
pub trait Staged: Entity {
    type Stage: Copy + Eq + Debug + Serialize + 'static;

    /// Columns, left to right.
    const PIPELINE: &'static [Self::Stage];

    fn stage(&self) -> Self::Stage;

    fn set_stage(&mut self, stage: Self::Stage);
}

#[derive(Debug, Clone)]
pub struct Column<T: Staged> {
    pub stage: T::Stage,
    pub cards: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct Board<T: Staged> {
    columns: Vec<Column<T>>,
}

impl<T: Staged> Board<T> {
    /// Lay records out in pipeline order, keeping input order within a column.
    pub fn from_records(records: &[T]) -> Self {
        let columns = T::PIPELINE
            .iter()
            .map(|&stage| Column {
                stage,
                cards: records
                    .iter()
                    .filter(|r| r.stage() == stage)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, stage: T::Stage) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.stage == stage)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Move card `id` into column `to` at `index` (end of column when `None`
    /// or past the end). Returns the card as it now reads.
    pub fn move_card(
        &mut self,
        id: &str,
        to: T::Stage,
        index: Option<usize>,
    ) -> Result<&T, ConsoleError> {
        let target = self
            .columns
            .iter()
            .position(|c| c.stage == to)
            .ok_or_else(|| ConsoleError::unexpected(format!("no column for stage {to:?}")))?;
        let (from, pos) = self.locate(id)?;

        let mut card = self.columns[from].cards.remove(pos);
        card.set_stage(to);
        let cards = &mut self.columns[target].cards;
        let at = index.unwrap_or(cards.len()).min(cards.len());
        cards.insert(at, card);
        log::debug!("Moved {} {} to {:?} at {}", T::KIND, id, to, at);
        Ok(&cards[at])
    }

    /// Move a card and persist its new stage. If the save fails the card goes
    /// back to the column and position it came from.
    pub async fn move_and_save(
        &mut self,
        backend: &MockBackend,
        id: &str,
        to: T::Stage,
        index: Option<usize>,
    ) -> Result<T, ConsoleError> {
        let (from, pos) = self.locate(id)?;
        let previous = self.columns[from].stage;
        let moved = self.move_card(id, to, index)?.clone();
        match backend.update(moved).await {
            Ok(saved) => Ok(saved),
            Err(err) => {
                self.move_card(id, previous, Some(pos))?;
                Err(err)
            }
        }
    }

    /// Column index and position of card `id`.
    fn locate(&self, id: &str) -> Result<(usize, usize), ConsoleError> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, c)| {
                c.cards
                    .iter()
                    .position(|card| card.record_id() == id)
                    .map(|pi| (ci, pi))
            })
            .ok_or_else(|| ConsoleError::NotFound {
                entity: T::KIND,
                id: id.to_string(),
            })
    }
}

/// Per-column summary shown in a deal column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealColumnTotals {
    pub stage: DealStatus,
    pub count: usize,
    pub amount: f64,
    pub weighted: f64,
}

impl Board<Deal> {
    pub fn totals(&self) -> Vec<DealColumnTotals> {
        self.columns
            .iter()
            .map(|c| DealColumnTotals {
                stage: c.stage,
                count: c.cards.len(),
                amount: c.cards.iter().map(|d| d.amount).sum(),
                weighted: c.cards.iter().map(Deal::weighted_amount).sum(),
            })
            .collect()
    }
}
