use crate::error::{AppError, AppResult};
use crate::models::{OrderBatch, TableKind, table_schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One CSV file per table in a single output directory.
///
/// Writes go to a sibling `.tmp` file that is renamed over the target once
/// complete, so a failed run never leaves a truncated table behind.
#[derive(Debug, Clone)]
pub struct TableStore {
    dir: PathBuf,
}

impl TableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, kind: TableKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn exists(&self, kind: TableKind) -> bool {
        self.path(kind).is_file()
    }

    pub fn write<T: Serialize>(&self, kind: TableKind, rows: &[T]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.write_tmp(kind, rows)?;
        let target = self.path(kind);
        fs::rename(&tmp, &target)?;
        log::info!("Wrote {} rows to {}", rows.len(), target.display());
        Ok(target)
    }

    /// Orders and items are committed together: if either file fails to
    /// write or rename, both tables are left as they were before the call.
    pub fn write_orders(&self, batch: &OrderBatch) -> AppResult<(PathBuf, PathBuf)> {
        self.write_orders_with(batch, |from, to| fs::rename(from, to))
    }

    fn write_orders_with<F>(
        &self,
        batch: &OrderBatch,
        mut rename: F,
    ) -> AppResult<(PathBuf, PathBuf)>
    where
        F: FnMut(&Path, &Path) -> io::Result<()>,
    {
        fs::create_dir_all(&self.dir)?;

        let orders_tmp = self.write_tmp(TableKind::Orders, &batch.orders)?;
        let items_tmp = match self.write_tmp(TableKind::OrderItems, &batch.items) {
            Ok(p) => p,
            Err(e) => {
                let _ = fs::remove_file(&orders_tmp);
                return Err(e);
            }
        };

        let orders_path = self.path(TableKind::Orders);
        let items_path = self.path(TableKind::OrderItems);
        // items land first so orders never reference lines that are not there
        let staged = [
            (items_tmp, items_path.clone()),
            (orders_tmp, orders_path.clone()),
        ];
        if let Err(e) = commit(&staged, &mut rename) {
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            return Err(e.into());
        }

        log::info!(
            "Wrote {} orders to {} and {} items to {}",
            batch.orders.len(),
            orders_path.display(),
            batch.items.len(),
            items_path.display()
        );
        Ok((orders_path, items_path))
    }

    /// Reads a whole table. An absent file is a `MissingInput` error.
    pub fn read<T: DeserializeOwned>(&self, kind: TableKind) -> AppResult<Vec<T>> {
        let path = self.path(kind);
        if !path.is_file() {
            return Err(AppError::MissingInput {
                table: kind.table_name().to_string(),
                path: path.display().to_string(),
            });
        }
        let mut rdr = csv::Reader::from_path(&path)?;
        let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
        log::debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn write_tmp<T: Serialize>(&self, kind: TableKind, rows: &[T]) -> AppResult<PathBuf> {
        let tmp = self.dir.join(format!("{}.tmp", kind.file_name()));
        let result = write_csv(&tmp, kind, rows);
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result.map(|_| tmp)
    }
}

/// Renames each staged file over its target. Existing targets are moved to
/// `<name>.bak` first; on any failure the committed files are removed and the
/// backups put back.
fn commit<F>(staged: &[(PathBuf, PathBuf)], rename: &mut F) -> io::Result<()>
where
    F: FnMut(&Path, &Path) -> io::Result<()>,
{
    let mut backups: Vec<(PathBuf, &Path)> = Vec::new();
    let mut committed: Vec<&Path> = Vec::new();
    let mut result = Ok(());

    for (_, target) in staged {
        if target.is_file() {
            let backup = backup_path(target);
            if let Err(e) = rename(target.as_path(), backup.as_path()) {
                result = Err(e);
                break;
            }
            backups.push((backup, target.as_path()));
        }
    }
    if result.is_ok() {
        for (tmp, target) in staged {
            if let Err(e) = rename(tmp.as_path(), target.as_path()) {
                result = Err(e);
                break;
            }
            committed.push(target.as_path());
        }
    }

    match result {
        Ok(()) => {
            for (backup, _) in &backups {
                let _ = fs::remove_file(backup);
            }
            Ok(())
        }
        Err(e) => {
            for target in committed {
                let _ = fs::remove_file(target);
            }
            for (backup, target) in backups.iter().rev() {
                if let Err(restore) = fs::rename(backup, target) {
                    log::error!("Could not restore {}: {restore}", target.display());
                }
            }
            Err(e)
        }
    }
}

fn backup_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn write_csv<T: Serialize>(path: &Path, kind: TableKind, rows: &[T]) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    // header comes from the schema so empty tables still carry one
    wtr.write_record(table_schema(kind).column_names())?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
