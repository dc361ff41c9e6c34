use std::io::{BufWriter, Write, stdout};
use std::path::Path;

use crate::{
    common::error::StoreError,
    store::{bootstrap, catalog::CatalogStore, ledger::LedgerStore},
};

/// Seeds the data directory (first positional argument, default `data`) and
/// prints a catalog and ledger status report. The interactive admin/cashier
/// front end drives the same stores through the library API.
pub fn run<I, S>(args: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let data_dir = args.get(1).map_or("data", String::as_str);
    let data_dir = Path::new(data_dir);

    bootstrap::ensure_data_files(data_dir)?;

    let catalog = CatalogStore::new(bootstrap::products_path(data_dir));
    let ledger = LedgerStore::new(bootstrap::bills_path(data_dir));

    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    write_status(writer, &catalog, &ledger)?;

    Ok(())
}

/// Writes the catalog grouped by category plus the next bill number.
fn write_status<W: Write>(
    mut w: W,
    catalog: &CatalogStore,
    ledger: &LedgerStore,
) -> Result<(), StoreError> {
    for category in catalog.categories()? {
        writeln!(w, "{category}:")?;
        for product in catalog.list_by_category(&category)? {
            writeln!(
                w,
                "  {}  {}  x{}",
                product.name, product.price, product.stock
            )?;
        }
    }
    writeln!(w, "next bill: {}", ledger.next_sequence_number()?)?;
    w.flush()?;
    Ok(())
}
