//! Income service
//!
//! Validates submitted income, then adds, deletes or clears records. Every
//! mutation is persisted, audited and broadcast before returning.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{IncomeId, IncomeRecord, Money, NewIncome};
use crate::storage::{Storage, StoreEvent};

use super::resolve_reference;

pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and record a new income
    pub fn add(&self, input: NewIncome) -> FintrackResult<IncomeRecord> {
        input
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        let record = IncomeRecord::from_new(input);
        self.storage.finance.push_income(record.clone())?;
        self.storage.finance.save()?;

        self.storage.log_create(
            EntityType::Income,
            record.id.to_string(),
            Some(describe(&record)),
            &record,
        )?;
        self.storage.notify(StoreEvent::IncomeAdded(record.id));

        info!(id = %record.id, amount = %record.amount, "income added");
        Ok(record)
    }

    /// Remove an income; `false` when nothing had that id
    pub fn delete(&self, id: IncomeId) -> FintrackResult<bool> {
        let Some(removed) = self.storage.finance.remove_income(id)? else {
            return Ok(false);
        };
        self.storage.finance.save()?;

        self.storage.log_delete(
            EntityType::Income,
            removed.id.to_string(),
            Some(describe(&removed)),
            &removed,
        )?;
        self.storage.notify(StoreEvent::IncomeDeleted(id));

        info!(id = %id, "income deleted");
        Ok(true)
    }

    /// Remove every income, returning how many were removed
    pub fn clear(&self) -> FintrackResult<usize> {
        let removed = self.storage.finance.take_incomes()?;
        self.storage.finance.save()?;

        let entries: Vec<_> = removed
            .iter()
            .map(|r| AuditEntry::delete(EntityType::Income, r.id.to_string(), Some(describe(r)), r))
            .collect();
        self.storage.log_batch(&entries)?;
        self.storage.notify(StoreEvent::IncomesCleared {
            removed: removed.len(),
        });

        info!(count = removed.len(), "incomes cleared");
        Ok(removed.len())
    }

    pub fn list(&self) -> FintrackResult<Vec<IncomeRecord>> {
        self.storage.finance.incomes()
    }

    /// Incomes flagged as taxable, in insertion order
    pub fn taxable(&self) -> FintrackResult<Vec<IncomeRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|income| income.taxable)
            .collect())
    }

    pub fn total(&self) -> FintrackResult<Money> {
        Ok(self.list()?.iter().map(|i| i.amount).sum())
    }

    /// Resolve a full id, short id or UUID prefix
    pub fn resolve(&self, reference: &str) -> FintrackResult<Option<IncomeId>> {
        let ids: Vec<_> = self.list()?.into_iter().map(|i| i.id).collect();
        resolve_reference("Income", ids, reference, |id, r| id.matches_reference(r))
    }
}

fn describe(record: &IncomeRecord) -> String {
    format!("{} {} on {}", record.income_type, record.amount, record.date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::IncomeType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_income(cents: i64, taxable: bool) -> NewIncome {
        NewIncome::new(
            Money::from_cents(cents),
            IncomeType::Cash,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            taxable,
        )
    }

    #[test]
    fn test_add_persists_immediately() {
        let (temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let record = service.add(new_income(10000, true)).unwrap();

        let reopened =
            Storage::open(FintrackPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let incomes = reopened.finance.incomes().unwrap();
        assert_eq!(incomes, vec![record]);
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let err = service.add(new_income(0, false)).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_size_tracks_adds_minus_deletes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        let a = service.add(new_income(100, false)).unwrap();
        let _b = service.add(new_income(200, false)).unwrap();
        let _c = service.add(new_income(300, false)).unwrap();

        assert!(service.delete(a.id).unwrap());
        assert!(!service.delete(a.id).unwrap());
        assert!(!service.delete(IncomeId::new()).unwrap());
        assert_eq!(service.list().unwrap().len(), 2);
        assert_eq!(service.total().unwrap().cents(), 500);
    }

    #[test]
    fn test_clear_and_audit_trail() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        service.add(new_income(100, false)).unwrap();
        service.add(new_income(200, true)).unwrap();
        assert_eq!(service.clear().unwrap(), 2);
        assert!(service.list().unwrap().is_empty());
        assert_eq!(service.clear().unwrap(), 0);

        // two creates + two deletes from the clear
        assert_eq!(storage.audit().read_all().unwrap().len(), 4);
    }

    #[test]
    fn test_taxable_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);

        service.add(new_income(100, false)).unwrap();
        let taxable = service.add(new_income(200, true)).unwrap();

        assert_eq!(service.taxable().unwrap(), vec![taxable]);
    }

    #[test]
    fn test_resolve_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = IncomeService::new(&storage);
        let record = service.add(new_income(100, false)).unwrap();

        assert_eq!(service.resolve(&record.id.to_string()).unwrap(), Some(record.id));
        assert_eq!(
            service.resolve(&record.id.as_uuid().to_string()).unwrap(),
            Some(record.id)
        );
        assert_eq!(service.resolve("inc-zzzzzzzz").unwrap(), None);
    }
}
