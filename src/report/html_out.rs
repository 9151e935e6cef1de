// Writing the per-user report files and the delivery archive.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use snafu::prelude::*;

use zip::write::{ExtendedFileOptions, FileOptions};
use zip::CompressionMethod;

use case_report::html::{render_record_table, render_user_report};
use case_report::{RecordTable, ReportConfig};

use crate::report::{
    ArchiveIoSnafu, ArchiveWriteSnafu, CreatingOutputDirSnafu, ReportResult, ReportWriteSnafu,
};

pub const ARCHIVE_NAME: &str = "informes.zip";

#[derive(Debug)]
pub struct ReportOutputs {
    pub written: Vec<PathBuf>,
    /// Entities whose file could not be persisted. A failure on one entity
    /// never aborts the others.
    pub failed: Vec<String>,
    pub archive: Option<PathBuf>,
}

/// Writes one HTML report per distinct value of the grouping column into
/// `out_dir`, then bundles them into [`ARCHIVE_NAME`] when `archive` is set.
///
/// When the grouping column is absent from the table the whole step is
/// skipped: no files, no error.
pub fn write_reports(
    table: &RecordTable,
    config: &ReportConfig,
    out_dir: &Path,
    archive: bool,
) -> ReportResult<ReportOutputs> {
    let entities = match table.distinct_values(&config.group_column) {
        Some(entities) => entities,
        None => {
            info!(
                "write_reports: column {} absent, skipping the per-user reports",
                config.group_column
            );
            return Ok(ReportOutputs {
                written: Vec::new(),
                failed: Vec::new(),
                archive: None,
            });
        }
    };
    fs::create_dir_all(out_dir).context(CreatingOutputDirSnafu {
        path: out_dir.display().to_string(),
    })?;

    let mut written: Vec<PathBuf> = Vec::new();
    let mut failed: Vec<String> = Vec::new();
    for (entity, file_name) in unique_file_names(&entities) {
        match write_one(table, config, out_dir, &entity, &file_name) {
            Ok(path) => {
                debug!("write_reports: {} -> {:?}", entity, path);
                written.push(path);
            }
            Err(e) => {
                warn!("write_reports: {}", e);
                failed.push(entity);
            }
        }
    }

    let archive_path = if archive && !written.is_empty() {
        Some(write_archive(out_dir, &written)?)
    } else {
        None
    };
    info!(
        "write_reports: {} written, {} failed",
        written.len(),
        failed.len()
    );
    Ok(ReportOutputs {
        written,
        failed,
        archive: archive_path,
    })
}

fn write_one(
    table: &RecordTable,
    config: &ReportConfig,
    out_dir: &Path,
    entity: &str,
    file_name: &str,
) -> ReportResult<PathBuf> {
    let part = match table.partition(&config.group_column, entity) {
        Some(part) => part,
        None => whatever!("grouping column {} disappeared", config.group_column),
    };
    let html = render_user_report(entity, &render_record_table(&part));
    let path = out_dir.join(file_name);
    fs::write(&path, html).context(ReportWriteSnafu { entity })?;
    Ok(path)
}

/// Replaces filesystem-unsafe characters in an entity value.
pub fn sanitize_entity(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "informe".to_string()
    } else {
        cleaned
    }
}

// Two distinct entity values may sanitize to the same file name; a numeric
// suffix keeps one file per entity.
fn unique_file_names(entities: &[String]) -> Vec<(String, String)> {
    let mut used: HashSet<String> = HashSet::new();
    entities
        .iter()
        .map(|entity| {
            let base = sanitize_entity(entity);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            (entity.clone(), format!("{}.html", candidate))
        })
        .collect()
}

fn write_archive(out_dir: &Path, files: &[PathBuf]) -> ReportResult<PathBuf> {
    let path = out_dir.join(ARCHIVE_NAME);
    let archive_path = path.display().to_string();
    let file = fs::File::create(&path).context(ArchiveIoSnafu {
        path: &archive_path,
    })?;
    let mut zip = zip::ZipWriter::new(file);
    let options =
        FileOptions::<ExtendedFileOptions>::default().compression_method(CompressionMethod::Deflated);
    for f in files {
        let name = f
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("informe.html");
        zip.start_file(name, options.clone()).context(ArchiveWriteSnafu {
            path: &archive_path,
        })?;
        let contents = fs::read(f).context(ArchiveIoSnafu {
            path: &archive_path,
        })?;
        zip.write_all(&contents).context(ArchiveIoSnafu {
            path: &archive_path,
        })?;
    }
    zip.finish().context(ArchiveWriteSnafu {
        path: &archive_path,
    })?;
    debug!("write_archive: {} files -> {:?}", files.len(), path);
    Ok(path)
}
