use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::{
    Category, Cents, Clock, ExpenseId, ExpenseRecord, IdGenerator, MonthlySummary, RandomIds,
    SystemClock, ValidationError, check_amount, check_date, sample_expenses, summarize,
};

/// The authoritative, in-memory collection of expense records.
pub struct Ledger {
    /// Records in insertion order
    records: Vec<ExpenseRecord>,
    last_sequence: u64,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Ledger {
    /// Create an empty ledger using the wall clock and random UUIDs.
    pub fn new() -> Self {
        Self::with_sources(SystemClock, RandomIds)
    }

    /// Create an empty ledger with an injected clock and id generator.
    pub fn with_sources(
        clock: impl Clock + 'static,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        Self {
            records: Vec::new(),
            last_sequence: 0,
            clock: Box::new(clock),
            ids: Box::new(ids),
        }
    }

    /// Current instant according to the ledger's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validate and insert a new expense.
    ///
    /// Nothing is inserted if the date is in the future or the amount is out
    /// of range. A blank description defaults to the category's display name.
    pub fn add(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<ExpenseRecord, ValidationError> {
        check_date(date, self.clock.now())?;
        check_amount(amount_cents)?;

        let mut id = self.ids.next_id();
        while self.get(id).is_some() {
            id = self.ids.next_id();
        }
        self.last_sequence += 1;

        let record = ExpenseRecord::new(
            id,
            self.last_sequence,
            date,
            category,
            amount_cents,
            description,
        );
        debug!(%id, %date, %category, amount_cents, "expense added");

        self.records.push(record.clone());
        Ok(record)
    }

    /// Remove the record with the given id. Returns whether anything was removed.
    pub fn remove(&mut self, id: ExpenseId) -> bool {
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records.remove(index);
                debug!(%id, "expense removed");
                true
            }
            None => false,
        }
    }

    /// Snapshot of the records, most recent date first.
    ///
    /// Records sharing a date are listed most recently inserted first.
    pub fn list(&self, category: Option<Category>) -> Vec<ExpenseRecord> {
        let mut records: Vec<ExpenseRecord> = self
            .records
            .iter()
            .filter(|r| category.is_none_or(|c| r.category() == c))
            .cloned()
            .collect();

        records.sort_by(|a, b| {
            b.sort_key()
                .cmp(&a.sort_key())
                .then_with(|| b.sequence().cmp(&a.sequence()))
        });
        records
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Monthly statistics for the month of `reference`.
    pub fn summary(&self, reference: NaiveDate) -> MonthlySummary {
        summarize(&self.records, reference)
    }

    /// Add the demo dataset through the regular validation path.
    /// Either every sample expense is added or none is.
    pub fn load_sample_data(&mut self) -> Result<Vec<ExpenseRecord>, ValidationError> {
        let samples = sample_expenses();
        let now = self.clock.now();
        for sample in &samples {
            check_date(sample.date, now)?;
            check_amount(sample.amount_cents)?;
        }

        samples
            .into_iter()
            .rev()
            .map(|s| self.add(s.date, s.category, s.amount_cents, Some(s.description)))
            .collect()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("records", &self.records)
            .field("last_sequence", &self.last_sequence)
            .finish_non_exhaustive()
    }
}
