//! Transaction history
//!
//! Merges incomes and expenses into one date-descending view, then applies
//! the search / kind / date range / label filters and an optional sort. All
//! of it is read-only over the store.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::ValueEnum;
use tracing::debug;

use crate::error::FintrackResult;
use crate::models::{ExpenseRecord, IncomeRecord, Money, TransactionKind, TransactionView};
use crate::storage::Storage;

/// Tag every record and order newest first; ties keep incomes before expenses
pub fn merge_history(incomes: &[IncomeRecord], expenses: &[ExpenseRecord]) -> Vec<TransactionView> {
    let mut views: Vec<TransactionView> = incomes
        .iter()
        .cloned()
        .map(TransactionView::Income)
        .chain(expenses.iter().cloned().map(TransactionView::Expense))
        .collect();
    views.sort_by(newest_first);
    views
}

/// Distinct labels in first-seen order
pub fn distinct_labels(views: &[TransactionView]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for view in views {
        if !labels.iter().any(|l| l == view.label()) {
            labels.push(view.label().to_string());
        }
    }
    labels
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    fn admits(&self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// Conjunctive filter over the merged history
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Case-insensitive substring of kind, label, amount or date
    pub search: Option<String>,
    pub kind: KindFilter,
    /// Inclusive
    pub from: Option<NaiveDate>,
    /// Inclusive
    pub to: Option<NaiveDate>,
    /// Empty means every label passes
    pub labels: BTreeSet<String>,
}

impl HistoryFilter {
    pub fn matches(&self, view: &TransactionView) -> bool {
        if let Some(term) = self.search.as_deref() {
            if !matches_search(view, term) {
                return false;
            }
        }

        if !self.kind.admits(view.kind()) {
            return false;
        }

        if let Some(from) = self.from {
            if view.date() < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if view.date() > to {
                return false;
            }
        }

        if !self.labels.is_empty() && !self.labels.contains(view.label()) {
            return false;
        }

        true
    }

    pub fn apply(&self, views: Vec<TransactionView>) -> Vec<TransactionView> {
        views.into_iter().filter(|v| self.matches(v)).collect()
    }
}

/// Substring match on the raw term; only the empty term matches everything
fn matches_search(view: &TransactionView, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();

    [
        view.kind().as_str().to_string(),
        view.label().to_lowercase(),
        view.amount().to_plain_string(),
        view.date().to_string(),
    ]
    .iter()
    .any(|field| field.contains(&term))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort settings; no field leaves the filtered order as it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySort {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl HistorySort {
    pub fn new(field: Option<SortField>, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Stable sort in place
    pub fn apply(&self, views: &mut [TransactionView]) {
        let Some(field) = self.field else {
            return;
        };

        views.sort_by(|a, b| {
            let ordering = match field {
                SortField::Date => a.date().cmp(&b.date()),
                SortField::Amount => a.amount().cmp(&b.amount()),
            };
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryTotals {
    pub income: Money,
    pub expenses: Money,
    pub count: usize,
}

impl HistoryTotals {
    pub fn of(views: &[TransactionView]) -> Self {
        views.iter().fold(Self::default(), |mut totals, view| {
            match view.kind() {
                TransactionKind::Income => totals.income += view.amount(),
                TransactionKind::Expense => totals.expenses += view.amount(),
            }
            totals.count += 1;
            totals
        })
    }

    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Filtered and sorted history with its totals
#[derive(Debug, Clone)]
pub struct HistoryReport {
    pub entries: Vec<TransactionView>,
    /// Labels across the whole unfiltered history
    pub labels: Vec<String>,
    pub totals: HistoryTotals,
}

impl HistoryReport {
    pub fn generate(
        storage: &Storage,
        filter: &HistoryFilter,
        sort: &HistorySort,
    ) -> FintrackResult<Self> {
        let incomes = storage.finance.incomes()?;
        let expenses = storage.finance.expenses()?;
        Ok(Self::compute(&incomes, &expenses, filter, sort))
    }

    pub fn compute(
        incomes: &[IncomeRecord],
        expenses: &[ExpenseRecord],
        filter: &HistoryFilter,
        sort: &HistorySort,
    ) -> Self {
        let merged = merge_history(incomes, expenses);
        let labels = distinct_labels(&merged);
        let total = merged.len();

        let mut entries = filter.apply(merged);
        sort.apply(&mut entries);
        debug!(total, shown = entries.len(), "history filtered");

        Self {
            totals: HistoryTotals::of(&entries),
            entries,
            labels,
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "{} transaction(s)  Income: {}  Expenses: {}  Net: {}",
            self.totals.count,
            self.totals.income,
            self.totals.expenses,
            self.totals.net()
        )
    }
}

/// Compare two views the way the merged history orders them
pub fn newest_first(a: &TransactionView, b: &TransactionView) -> Ordering {
    b.date().cmp(&a.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeType, NewExpense, NewIncome};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(cents: i64, income_type: IncomeType, on: NaiveDate) -> IncomeRecord {
        IncomeRecord::from_new(NewIncome::new(Money::from_cents(cents), income_type, on, false))
    }

    fn expense(cents: i64, category: ExpenseCategory, on: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::from_new(NewExpense::new(Money::from_cents(cents), "misc", category, on))
    }

    fn sample() -> (Vec<IncomeRecord>, Vec<ExpenseRecord>) {
        (
            vec![
                income(10_000, IncomeType::Cash, date(2024, 1, 15)),
                income(250_050, IncomeType::Card, date(2024, 2, 1)),
            ],
            vec![
                expense(4_000, ExpenseCategory::Food, date(2024, 1, 16)),
                expense(12_000, ExpenseCategory::Housing, date(2024, 1, 1)),
                expense(1_500, ExpenseCategory::Food, date(2024, 2, 3)),
            ],
        )
    }

    #[test]
    fn test_merge_orders_newest_first() {
        let incomes = vec![income(10_000, IncomeType::Cash, date(2024, 1, 15))];
        let expenses = vec![expense(4_000, ExpenseCategory::Food, date(2024, 1, 16))];

        let merged = merge_history(&incomes, &expenses);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].kind(), TransactionKind::Expense);
        assert_eq!(merged[0].amount().cents(), 4_000);
        assert_eq!(merged[1].kind(), TransactionKind::Income);
        assert!(merged.windows(2).all(|w| newest_first(&w[0], &w[1]) != Ordering::Greater));
    }

    #[test]
    fn test_merge_ties_keep_incomes_first() {
        let on = date(2024, 1, 1);
        let merged = merge_history(
            &[income(100, IncomeType::Cash, on)],
            &[expense(100, ExpenseCategory::Food, on)],
        );
        assert!(merged[0].is_income());
    }

    #[test]
    fn test_distinct_labels_first_seen() {
        let (incomes, expenses) = sample();
        let merged = merge_history(&incomes, &expenses);
        assert_eq!(distinct_labels(&merged), vec!["Food", "card", "cash", "Housing"]);
    }

    #[test]
    fn test_search_matches_amount_date_and_label() {
        let (incomes, expenses) = sample();
        let merged = merge_history(&incomes, &expenses);

        let by = |term: &str| {
            HistoryFilter {
                search: Some(term.to_string()),
                ..Default::default()
            }
            .apply(merged.clone())
        };

        assert_eq!(by("2500.5").len(), 1);
        assert_eq!(by("2024-01").len(), 3);
        assert_eq!(by("FOOD").len(), 2);
        assert_eq!(by("expense").len(), 3);
        assert_eq!(by("").len(), 5);
    }

    #[test]
    fn test_search_term_whitespace_is_kept() {
        let (incomes, expenses) = sample();
        let merged = merge_history(&incomes, &expenses);

        let by = |term: &str| {
            HistoryFilter {
                search: Some(term.to_string()),
                ..Default::default()
            }
            .apply(merged.clone())
        };

        assert!(by("   ").is_empty());
        assert!(by(" food").is_empty());
        assert_eq!(by("food").len(), 2);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let (incomes, expenses) = sample();
        let merged = merge_history(&incomes, &expenses);

        let full = HistoryFilter {
            search: Some("2024".into()),
            kind: KindFilter::Expense,
            from: Some(date(2024, 1, 2)),
            to: Some(date(2024, 2, 3)),
            labels: BTreeSet::from(["Food".to_string()]),
        };
        let narrowed = full.apply(merged.clone());
        assert_eq!(narrowed.len(), 2);

        let relaxed = [
            HistoryFilter { search: None, ..full.clone() },
            HistoryFilter { kind: KindFilter::All, ..full.clone() },
            HistoryFilter { from: None, ..full.clone() },
            HistoryFilter { to: None, ..full.clone() },
            HistoryFilter { labels: BTreeSet::new(), ..full.clone() },
        ];
        for filter in relaxed {
            assert!(filter.apply(merged.clone()).len() >= narrowed.len());
        }
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let (incomes, expenses) = sample();
        let filter = HistoryFilter {
            from: Some(date(2024, 1, 15)),
            to: Some(date(2024, 1, 16)),
            ..Default::default()
        };
        let report = HistoryReport::compute(&incomes, &expenses, &filter, &HistorySort::default());
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.totals.net().cents(), 6_000);
    }

    #[test]
    fn test_sort_by_amount_is_idempotent() {
        let (incomes, expenses) = sample();
        let mut views = merge_history(&incomes, &expenses);
        let sort = HistorySort::new(Some(SortField::Amount), SortDirection::Asc);

        sort.apply(&mut views);
        let once = views.clone();
        sort.apply(&mut views);
        assert_eq!(views, once);

        let amounts: Vec<_> = views.iter().map(|v| v.amount().cents()).collect();
        assert_eq!(amounts, vec![1_500, 4_000, 10_000, 12_000, 250_050]);
    }

    #[test]
    fn test_no_sort_field_keeps_order() {
        let (incomes, expenses) = sample();
        let merged = merge_history(&incomes, &expenses);
        let mut views = merged.clone();
        HistorySort::new(None, SortDirection::Asc).apply(&mut views);
        assert_eq!(views, merged);
    }
}
