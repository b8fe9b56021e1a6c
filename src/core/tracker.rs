use uuid::Uuid;

use crate::{
    errors::{ExpenseError, Result},
    ledger::{Expense, ExpenseDraft, MonthSelector},
    storage::ExpenseStorage,
};

use super::aggregator::{self, ExpenseSummary, FilteredExpense};

/// Session owner of the expense list and its durable mirror.
///
/// Mutations are staged on a copy of the list, persisted, and only then
/// swapped in, so a failed save leaves the visible list untouched.
pub struct ExpenseTracker {
    expenses: Vec<Expense>,
    storage: Box<dyn ExpenseStorage>,
}

impl ExpenseTracker {
    /// Loads the persisted list; corrupt data is returned to the caller.
    pub fn open(storage: Box<dyn ExpenseStorage>) -> Result<Self> {
        let expenses = storage.load()?;
        tracing::info!(count = expenses.len(), "expense tracker opened");
        Ok(Self { expenses, storage })
    }

    /// Starts from an empty list without reading the store.
    pub fn empty(storage: Box<dyn ExpenseStorage>) -> Self {
        Self {
            expenses: Vec::new(),
            storage,
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn add_draft(&mut self, draft: ExpenseDraft) -> Result<Uuid> {
        let expense = draft.validate()?;
        self.add(expense)
    }

    /// Appends `expense`; a record whose id is already taken (a cloned
    /// entry, say) is given a fresh one so every row stays addressable.
    pub fn add(&mut self, mut expense: Expense) -> Result<Uuid> {
        if !expense.amount.is_finite() {
            return Err(ExpenseError::InvalidAmount(format!(
                "{} is not a finite number",
                expense.amount
            )));
        }
        if expense.amount <= 0.0 {
            tracing::warn!(
                title = %expense.title,
                amount = expense.amount,
                "recording non-positive expense amount"
            );
        }
        if self.get(expense.id).is_some() {
            expense.id = Uuid::new_v4();
        }
        let id = expense.id;
        let mut staged = self.expenses.clone();
        staged.push(expense);
        self.commit(staged)?;
        tracing::info!(%id, "expense added");
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| ExpenseError::ExpenseNotFound(id.to_string()))?;
        self.remove_at(index)
    }

    /// Removes by position in the unfiltered list.
    pub fn remove_at(&mut self, index: usize) -> Result<Expense> {
        if index >= self.expenses.len() {
            return Err(ExpenseError::ExpenseNotFound(format!("index {}", index)));
        }
        let mut staged = self.expenses.clone();
        let removed = staged.remove(index);
        self.commit(staged)?;
        tracing::info!(id = %removed.id, "expense removed");
        Ok(removed)
    }

    /// Removes the `row`-th (zero-based) entry of the view for `selector`.
    pub fn remove_row(&mut self, selector: &MonthSelector, row: usize) -> Result<Expense> {
        let index = self
            .filtered(selector)
            .get(row)
            .map(|entry| entry.index)
            .ok_or_else(|| {
                ExpenseError::ExpenseNotFound(format!("row {} in {}", row + 1, selector))
            })?;
        self.remove_at(index)
    }

    pub fn filtered(&self, selector: &MonthSelector) -> Vec<FilteredExpense<'_>> {
        aggregator::filter_by_month(&self.expenses, selector)
    }

    pub fn summary(&self, selector: &MonthSelector) -> ExpenseSummary<'_> {
        aggregator::summarize(&self.expenses, selector)
    }

    fn commit(&mut self, staged: Vec<Expense>) -> Result<()> {
        if let Err(err) = self.storage.save(&staged) {
            tracing::warn!(error = %err, "save failed; in-memory expenses left unchanged");
            return Err(err);
        }
        self.expenses = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, NaiveDate};
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct MemoryState {
        saved: Vec<Expense>,
        saves: usize,
        fail_saves: bool,
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        state: Rc<RefCell<MemoryState>>,
    }

    impl ExpenseStorage for MemoryStore {
        fn load(&self) -> Result<Vec<Expense>> {
            Ok(self.state.borrow().saved.clone())
        }

        fn save(&self, expenses: &[Expense]) -> Result<()> {
            let mut state = self.state.borrow_mut();
            if state.fail_saves {
                return Err(ExpenseError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            state.saved = expenses.to_vec();
            state.saves += 1;
            Ok(())
        }
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn tracker() -> (ExpenseTracker, MemoryStore) {
        let store = MemoryStore::default();
        let tracker = ExpenseTracker::open(Box::new(store.clone())).expect("open");
        (tracker, store)
    }

    #[test]
    fn every_mutation_is_saved_immediately() {
        let (mut tracker, store) = tracker();
        let id = tracker
            .add(Expense::new("Coffee", 4.5, "Food", date(3, 5)))
            .expect("add");
        assert_eq!(store.state.borrow().saves, 1);
        assert_eq!(store.state.borrow().saved.len(), 1);

        tracker.remove(id).expect("remove");
        assert_eq!(store.state.borrow().saves, 2);
        assert!(store.state.borrow().saved.is_empty());
    }

    #[test]
    fn failed_save_rolls_back_add_and_remove() {
        let (mut tracker, store) = tracker();
        let id = tracker
            .add(Expense::new("Coffee", 4.5, "Food", date(3, 5)))
            .expect("add");
        store.state.borrow_mut().fail_saves = true;

        let add = tracker.add(Expense::new("Bus", 2.0, "Transport", date(3, 6)));
        assert!(matches!(add, Err(ExpenseError::Io(_))));
        assert_eq!(tracker.len(), 1);

        assert!(tracker.remove(id).is_err());
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get(id).is_some());
    }

    #[test]
    fn remove_row_targets_the_displayed_entry() {
        let (mut tracker, _store) = tracker();
        tracker
            .add(Expense::new("Movie", 12.0, "Entertainment", date(4, 1)))
            .unwrap();
        tracker
            .add(Expense::new("Coffee", 4.5, "Food", date(3, 5)))
            .unwrap();
        tracker
            .add(Expense::new("Bus", 2.0, "Transport", date(3, 6)))
            .unwrap();

        let march = MonthSelector::Month(Month::March);
        let removed = tracker.remove_row(&march, 1).expect("second March row");
        assert_eq!(removed.title, "Bus");
        let titles: Vec<_> = tracker.expenses().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Movie", "Coffee"]);

        let missing = tracker.remove_row(&march, 5);
        assert!(matches!(missing, Err(ExpenseError::ExpenseNotFound(_))));
    }

    #[test]
    fn cloned_entries_are_deleted_by_their_own_row() {
        let (mut tracker, store) = tracker();
        let coffee = Expense::new("Coffee", 4.5, "Food", date(3, 5));
        let first = tracker.add(coffee.clone()).unwrap();
        tracker
            .add(Expense::new("Movie", 12.0, "Entertainment", date(4, 1)))
            .unwrap();
        let second = tracker.add(coffee).unwrap();
        assert_ne!(first, second);

        let removed = tracker.remove_row(&MonthSelector::All, 2).expect("third row");
        assert_eq!(removed.id, second);
        let titles: Vec<_> = tracker.expenses().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Coffee", "Movie"]);
        assert_eq!(tracker.expenses()[0].id, first);
        assert_eq!(store.state.borrow().saved.len(), 2);
    }

    #[test]
    fn rejects_non_finite_amount_without_saving() {
        let (mut tracker, store) = tracker();
        let result = tracker.add(Expense::new("Broken", f64::INFINITY, "Other", date(1, 1)));
        assert!(matches!(result, Err(ExpenseError::InvalidAmount(_))));
        assert_eq!(store.state.borrow().saves, 0);
    }

    #[test]
    fn non_positive_amounts_are_kept() {
        let (mut tracker, _store) = tracker();
        tracker
            .add(Expense::new("Refund", -5.0, "Other", date(2, 2)))
            .expect("lax amount");
        assert_eq!(tracker.summary(&MonthSelector::All).grand_total, -5.0);
    }

    #[test]
    fn add_draft_validates_before_touching_storage() {
        let (mut tracker, store) = tracker();
        let err = tracker
            .add_draft(ExpenseDraft::new("Coffee", "abc", "Food", date(3, 5)))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount(_)));
        assert_eq!(store.state.borrow().saves, 0);
        assert!(tracker.is_empty());
    }
}
