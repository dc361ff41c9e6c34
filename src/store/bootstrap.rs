use crate::common::error::StoreError;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub const ADMIN_FILE: &str = "admin.txt";
pub const CASHIERS_FILE: &str = "cashiers.txt";
pub const PRODUCTS_FILE: &str = "products.txt";
pub const BILLS_FILE: &str = "bills.txt";

const SEED_ADMIN: &str = "admin,admin123\n";

const SEED_CASHIERS: &str = "\
john,john123
mary,mary123
alex,alex123
";

const SEED_PRODUCTS: &str = "\
Electronics,Laptop,1200.00,10
Electronics,Smartphone,800.00,15
Electronics,Tablet,500.00,20
Electronics,Headphones,150.00,30
Electronics,Smart Watch,250.00,25
Clothing,T-Shirt,20.00,50
Clothing,Jeans,50.00,40
Clothing,Jacket,80.00,30
Clothing,Sweater,40.00,35
Clothing,Dress,60.00,25
Groceries,Rice (1kg),5.00,100
Groceries,Pasta,3.00,80
Groceries,Milk,2.50,60
Groceries,Bread,2.00,70
Groceries,Eggs,3.50,50
Home Decor,Lamp,45.00,20
Home Decor,Cushion,15.00,40
Home Decor,Vase,25.00,30
Home Decor,Picture Frame,20.00,35
Home Decor,Rug,75.00,15
Books,Fiction Novel,15.00,45
Books,Cookbook,25.00,30
Books,Biography,18.00,40
Books,Self-Help,22.00,35
Books,Academic,35.00,25
";

pub fn admin_path(data_dir: &Path) -> PathBuf {
    data_dir.join(ADMIN_FILE)
}

pub fn cashiers_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CASHIERS_FILE)
}

pub fn products_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PRODUCTS_FILE)
}

pub fn bills_path(data_dir: &Path) -> PathBuf {
    data_dir.join(BILLS_FILE)
}

/// Creates the data directory and seeds each record file that does not exist
/// yet. Files already present are left alone; the stores themselves treat a
/// missing file as an empty dataset, so running this is optional.
pub fn ensure_data_files(data_dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(data_dir)?;

    seed_if_absent(&admin_path(data_dir), SEED_ADMIN)?;
    seed_if_absent(&cashiers_path(data_dir), SEED_CASHIERS)?;
    seed_if_absent(&products_path(data_dir), SEED_PRODUCTS)?;
    seed_if_absent(&bills_path(data_dir), "")?;

    Ok(())
}

fn seed_if_absent(path: &Path, contents: &str) -> Result<(), StoreError> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), "seeded data file");
    Ok(())
}
