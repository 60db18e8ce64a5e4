use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, trace, warn};

use hoa_cli::logging::redact_value;
use hoa_import::{
    CancelToken, ImportExecutor, ImportSession, InMemoryRepository, ProgressObserver,
};
use hoa_map::{MappingEngine, MatchSource};
use hoa_model::{ColumnMapping, EntityType, FieldCatalog, ImportResult, RawRow, Record};
use hoa_validate::validate_mapping;

use crate::cli::{FieldsArgs, ImportArgs, MapArgs};
use crate::summary::apply_table_style;
use crate::types::{ImportReport, MapReport, MappingRow};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let catalog = FieldCatalog::for_entity(args.entity.into());
    let mut table = Table::new();
    table.set_header(vec!["Field", "Label", "Required", "Category", "Description"]);
    apply_table_style(&mut table);
    for field in &catalog.fields {
        table.add_row(vec![
            field.name.clone(),
            field.label.clone(),
            if field.required { "yes" } else { "" }.to_string(),
            field.category.to_string(),
            field.description.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_map(args: &MapArgs) -> Result<MapReport> {
    let entity: EntityType = args.entity.into();
    let span = info_span!("map", file = %args.file.display(), entity = %entity);
    let _guard = span.enter();

    let (headers, rows) = read_csv(&args.file)?;
    let engine = MappingEngine::new(entity);
    let proposals = engine.propose(&headers);
    let mut mappings: Vec<ColumnMapping> =
        proposals.iter().map(|p| p.mapping.clone()).collect();
    let mut origins: Vec<String> = proposals.iter().map(|p| origin_label(p.source)).collect();

    if let Some(path) = &args.mapping {
        let overrides = load_overrides(path)?;
        apply_overrides(engine.catalog(), &mut mappings, &mut origins, &overrides);
    }

    let structural = validate_mapping(entity, &mappings);
    info!(
        columns = headers.len(),
        rows = rows.len(),
        valid = structural.is_valid,
        "mapping proposed"
    );

    let mapping_rows = mappings
        .iter()
        .zip(origins)
        .map(|(mapping, origin)| MappingRow {
            source: mapping.source_field.clone(),
            target: mapping.target_field.clone(),
            origin,
        })
        .collect();
    Ok(MapReport {
        file: args.file.clone(),
        entity,
        row_count: rows.len(),
        mappings: mapping_rows,
        structural,
    })
}

pub fn run_import(args: &ImportArgs) -> Result<ImportReport> {
    let entity: EntityType = args.entity.into();
    let span = info_span!("import", file = %args.file.display(), entity = %entity);
    let _guard = span.enter();
    let start = Instant::now();

    let (headers, rows) = read_csv(&args.file)?;
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.csv");
    let mut session = ImportSession::new(file_name, entity, headers, rows);
    session.propose_mapping();

    if let Some(path) = &args.mapping {
        let overrides = load_overrides(path)?;
        let catalog = FieldCatalog::for_entity(entity);
        let mut mappings = session.mappings().to_vec();
        let mut origins = vec![String::new(); mappings.len()];
        apply_overrides(&catalog, &mut mappings, &mut origins, &overrides);
        session.set_mapping(mappings);
    }

    let structural = session.validate_structure().clone();
    if !structural.is_valid {
        warn!(errors = structural.errors.len(), "mapping is not importable");
        return Ok(ImportReport {
            file: args.file.clone(),
            entity,
            structural,
            row_validation: None,
            result: None,
            output: None,
            dry_run: args.dry_run,
        });
    }

    let row_validation = session.validate_data()?.clone();
    info!(
        total = row_validation.row_counts.total,
        valid = row_validation.row_counts.valid,
        warnings = row_validation.row_counts.warnings,
        errors = row_validation.row_counts.errors,
        "rows validated"
    );

    if args.dry_run {
        info!("dry run; nothing committed");
        return Ok(ImportReport {
            file: args.file.clone(),
            entity,
            structural,
            row_validation: Some(row_validation),
            result: None,
            output: None,
            dry_run: true,
        });
    }

    let repository = InMemoryRepository::new();
    let executor = ImportExecutor::new(&repository).with_chunk_size(args.chunk_size);
    let observer = BarObserver::new();
    let result = executor.execute(&mut session, &CancelToken::new(), &observer)?;
    info!(
        imported = result.records_imported,
        duration_ms = start.elapsed().as_millis(),
        "import finished"
    );

    let mut output = None;
    if let Some(path) = &args.output
        && result.records_imported > 0
    {
        write_records(path, &repository.committed(entity))?;
        output = Some(path.clone());
    }

    Ok(ImportReport {
        file: args.file.clone(),
        entity,
        structural,
        row_validation: Some(row_validation),
        result: Some(result),
        output,
        dry_run: false,
    })
}

/// Read a CSV file into its header row and one `RawRow` per record.
fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<RawRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header row of {}", path.display()))?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("read row {} of {}", index + 2, path.display()))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        if tracing::enabled!(tracing::Level::TRACE) {
            let cells = record.iter().collect::<Vec<_>>().join(",");
            trace!(row = index + 1, data = redact_value(&cells), "row read");
        }
        rows.push(row);
    }
    debug!(columns = headers.len(), rows = rows.len(), "file loaded");
    Ok((headers, rows))
}

/// Load operator overrides: source header to canonical target field.
fn load_overrides(path: &Path) -> Result<BTreeMap<String, String>> {
    let file =
        File::open(path).with_context(|| format!("open mapping file {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parse mapping file {}", path.display()))
}

/// Replace proposed targets with operator choices. Overrides naming an
/// unknown column or a target outside the catalog are skipped with a
/// warning; the structural check still runs on whatever remains.
fn apply_overrides(
    catalog: &FieldCatalog,
    mappings: &mut [ColumnMapping],
    origins: &mut [String],
    overrides: &BTreeMap<String, String>,
) {
    for (source, target) in overrides {
        let Some(position) = mappings
            .iter()
            .position(|mapping| mapping.source_field == *source)
        else {
            warn!(column = %source, "override names a column not present in the file");
            continue;
        };
        if !catalog.contains(target) && target != hoa_model::IGNORE_FIELD {
            warn!(column = %source, target = %target, "override target is not a known field");
            continue;
        }
        debug!(column = %source, target = %target, "operator override applied");
        mappings[position].target_field = target.clone();
        if let Some(origin) = origins.get_mut(position) {
            "operator".clone_into(origin);
        }
    }
}

fn origin_label(source: MatchSource) -> String {
    match source {
        MatchSource::Recognizer(concept) => format!("pattern:{concept}"),
        MatchSource::LabelScore => "label-score".to_string(),
        MatchSource::Unmatched => "unmatched".to_string(),
    }
}

fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create output file {}", path.display()))?;
    serde_json::to_writer_pretty(file, records)
        .with_context(|| format!("write records to {}", path.display()))?;
    info!(path = %path.display(), count = records.len(), "records written");
    Ok(())
}

/// Progress bar bridging executor notifications to the terminal.
struct BarObserver {
    bar: ProgressBar,
}

impl BarObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}%")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl ProgressObserver for BarObserver {
    fn on_progress(&self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }

    fn on_finished(&self, _result: &ImportResult) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn overrides_replace_targets_and_skip_unknowns() {
        let catalog = FieldCatalog::for_entity(EntityType::Resident);
        let mut mappings = vec![
            ColumnMapping::new("Name", "first_name"),
            ColumnMapping::new("Notes", "ignore"),
        ];
        let mut origins = vec!["label-score".to_string(), "unmatched".to_string()];
        let overrides: BTreeMap<String, String> = [
            ("Name".to_string(), "last_name".to_string()),
            ("Notes".to_string(), "no_such_field".to_string()),
            ("Missing".to_string(), "email".to_string()),
        ]
        .into_iter()
        .collect();

        apply_overrides(&catalog, &mut mappings, &mut origins, &overrides);

        assert_eq!(mappings[0].target_field, "last_name");
        assert_eq!(origins[0], "operator");
        // Unknown target and unknown column are both left alone.
        assert_eq!(mappings[1].target_field, "ignore");
        assert_eq!(origins[1], "unmatched");
    }

    #[test]
    fn overrides_may_force_ignore() {
        let catalog = FieldCatalog::for_entity(EntityType::Resident);
        let mut mappings = vec![ColumnMapping::new("Fax", "phone")];
        let mut origins = vec!["pattern:phone".to_string()];
        let overrides: BTreeMap<String, String> =
            [("Fax".to_string(), "ignore".to_string())].into_iter().collect();

        apply_overrides(&catalog, &mut mappings, &mut origins, &overrides);
        assert!(mappings[0].is_ignored());
    }

    #[test]
    fn csv_files_load_into_header_keyed_rows() {
        let mut path = std::env::temp_dir();
        path.push(format!("hoa-cli-read-csv-{}.csv", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "First Name,Last Name,Email").unwrap();
            writeln!(file, "John,Doe,john@example.com").unwrap();
            writeln!(file, "Jane,Roe,jane@example.com").unwrap();
        }
        let (headers, rows) = read_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(headers, vec!["First Name", "Last Name", "Email"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["First Name"], "John");
        assert_eq!(rows[1]["Email"], "jane@example.com");
    }

    #[test]
    fn origin_labels_name_the_evidence() {
        assert_eq!(
            origin_label(MatchSource::Recognizer("email")),
            "pattern:email"
        );
        assert_eq!(origin_label(MatchSource::LabelScore), "label-score");
        assert_eq!(origin_label(MatchSource::Unmatched), "unmatched");
    }
}
