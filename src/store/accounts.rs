use crate::common::error::StoreError;
use crate::domain::account::{Account, Role};
use crate::store::codec;
use std::{
    fs::{File, OpenOptions},
    io::ErrorKind,
    path::PathBuf,
};
use tracing::debug;

/// Owns the admin and cashier credential files. Cashier mutations follow the
/// same whole-file read-rewrite cycle as the catalog.
///
/// Single writer assumed, like `CatalogStore`.
#[derive(Debug)]
pub struct AccountStore {
    admin_path: PathBuf,
    cashiers_path: PathBuf,
}

impl AccountStore {
    pub fn new(admin_path: impl Into<PathBuf>, cashiers_path: impl Into<PathBuf>) -> Self {
        Self {
            admin_path: admin_path.into(),
            cashiers_path: cashiers_path.into(),
        }
    }

    /// Checks credentials against the singleton admin record. A missing file
    /// means no admin exists yet, so authentication fails quietly.
    pub fn authenticate_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError> {
        let admin = match File::open(&self.admin_path) {
            Ok(file) => codec::read_accounts(file, Role::Admin)?.into_iter().next(),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(admin.filter(|a| a.username == username && a.password == password))
    }

    /// Scans the cashier file for an exact username/password match.
    pub fn authenticate_cashier(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self
            .list_cashiers()?
            .into_iter()
            .find(|a| a.username == username && a.password == password))
    }

    /// All cashier accounts in file order.
    pub fn list_cashiers(&self) -> Result<Vec<Account>, StoreError> {
        match File::open(&self.cashiers_path) {
            Ok(file) => codec::read_accounts(file, Role::Cashier),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn add_cashier(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let cashiers = self.list_cashiers()?;
        if cashiers.iter().any(|a| a.username == username) {
            return Err(StoreError::DuplicateKey(format!("username {username}")));
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.cashiers_path)?;
        codec::write_accounts(file, &[Account::new(username, password, Role::Cashier)])?;

        debug!(username, "cashier added");
        Ok(())
    }

    pub fn update_cashier(
        &self,
        old_username: &str,
        new_username: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        self.replace(old_username, |_| {
            Some(Account::new(new_username, new_password, Role::Cashier))
        })
    }

    pub fn delete_cashier(&self, username: &str) -> Result<(), StoreError> {
        self.replace(username, |_| None)
    }

    /// Read-rewrite cycle over the cashier file, mirroring
    /// `CatalogStore::replace`. A miss returns `NotFound` before any write.
    fn replace(
        &self,
        username: &str,
        f: impl Fn(&Account) -> Option<Account>,
    ) -> Result<(), StoreError> {
        let cashiers = self.list_cashiers()?;
        if !cashiers.iter().any(|a| a.username == username) {
            return Err(StoreError::NotFound(format!("username {username}")));
        }

        let rewritten: Vec<Account> = cashiers
            .into_iter()
            .filter_map(|a| if a.username == username { f(&a) } else { Some(a) })
            .collect();

        let file = File::create(&self.cashiers_path)?;
        codec::write_accounts(file, &rewritten)?;

        debug!(username, records = rewritten.len(), "cashier file rewritten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> AccountStore {
        AccountStore::new(dir.path().join("admin.txt"), dir.path().join("cashiers.txt"))
    }

    #[test]
    fn admin_authentication_requires_exact_match() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("admin.txt"), "admin,admin123\n").unwrap();
        let store = store_in(&dir);

        let account = store.authenticate_admin("admin", "admin123").unwrap();
        assert_eq!(
            account,
            Some(Account::new("admin", "admin123", Role::Admin))
        );

        assert!(store.authenticate_admin("admin", "wrong").unwrap().is_none());
        assert!(store.authenticate_admin("root", "admin123").unwrap().is_none());
    }

    #[test]
    fn missing_admin_file_fails_authentication_quietly() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.authenticate_admin("admin", "admin123").unwrap().is_none());
    }

    #[test]
    fn cashier_authentication_scans_all_records() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();
        store.add_cashier("mary", "mary123").unwrap();

        let account = store.authenticate_cashier("mary", "mary123").unwrap();
        assert_eq!(
            account,
            Some(Account::new("mary", "mary123", Role::Cashier))
        );

        assert!(store.authenticate_cashier("mary", "john123").unwrap().is_none());
    }

    #[test]
    fn list_cashiers_preserves_file_order() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();
        store.add_cashier("mary", "mary123").unwrap();
        store.add_cashier("alex", "alex123").unwrap();

        let usernames: Vec<String> = store
            .list_cashiers()
            .unwrap()
            .into_iter()
            .map(|a| a.username)
            .collect();

        assert_eq!(usernames, vec!["john", "mary", "alex"]);
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();

        let err = store.add_cashier("john", "other").unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(store.list_cashiers().unwrap().len(), 1);
    }

    #[test]
    fn update_renames_and_keeps_other_records() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();
        store.add_cashier("mary", "mary123").unwrap();

        store.update_cashier("john", "johnny", "newpass").unwrap();

        let cashiers = store.list_cashiers().unwrap();
        assert_eq!(
            cashiers[0],
            Account::new("johnny", "newpass", Role::Cashier)
        );
        assert_eq!(cashiers[1].username, "mary");
    }

    #[test]
    fn second_update_on_renamed_username_fails_with_not_found() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();

        store.update_cashier("john", "johnny", "newpass").unwrap();
        let err = store.update_cashier("john", "jack", "pass").unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn delete_removes_only_the_target() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();
        store.add_cashier("mary", "mary123").unwrap();

        store.delete_cashier("john").unwrap();

        let cashiers = store.list_cashiers().unwrap();
        assert_eq!(cashiers.len(), 1);
        assert_eq!(cashiers[0].username, "mary");
    }

    #[test]
    fn delete_missing_username_fails_with_not_found() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.add_cashier("john", "john123").unwrap();

        assert!(matches!(
            store.delete_cashier("mary"),
            Err(StoreError::NotFound(_))
        ));
    }
}
