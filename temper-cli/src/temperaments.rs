use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use clap::Args;
use temper::editable::EditableTemperament;
use temper::interchange::{self, FileCheck, ImportedTemperaments};
use temper::scale::MusicalScaleBuilder;
use temper::store::TemperamentStore;
use temper::temperament::TemperamentWithNoteNames;

use crate::dto::{CheckDto, CheckedTemperamentDto, TemperDto};
use crate::error::ResultExt;
use crate::{App, CliError, CliResult};

#[derive(Args)]
pub(crate) struct CustomOptions {
    /// Load custom temperaments from a file in the interchange format
    #[arg(long = "custom")]
    custom_file: Option<PathBuf>,
}

impl CustomOptions {
    /// Creates a store with the scale of `builder` active and the custom temperaments loaded.
    pub fn create_store(&self, builder: MusicalScaleBuilder) -> CliResult<TemperamentStore> {
        let mut store = TemperamentStore::new(builder.build()?);
        if let Some(custom_file) = &self.custom_file {
            store.replace_all(load_custom_temperaments(custom_file)?);
        }
        Ok(store)
    }
}

fn load_custom_temperaments(file_name: &Path) -> CliResult<Vec<TemperamentWithNoteNames>> {
    let imported = ImportedTemperaments::import(File::open(file_name)?)?;
    if imported.file_check == FileCheck::Invalid {
        return Err(CliError::CommandError(format!(
            "{} is not a valid temperament file",
            file_name.display()
        )));
    }

    let temperaments: Vec<_> = imported
        .temperaments
        .iter()
        .filter_map(|editable| {
            if editable.has_errors() {
                log::warn!("Skipping invalid temperament '{}'", editable.name);
                return None;
            }
            let temperament = editable.to_temperament_with_note_names();
            if temperament.is_none() {
                log::warn!("Skipping incomplete temperament '{}'", editable.name);
            }
            temperament
        })
        .collect();

    log::info!(
        "Loaded {} custom temperament(s) from {}",
        temperaments.len(),
        file_name.display()
    );
    Ok(temperaments)
}

#[derive(Args)]
pub(crate) struct ListOptions {
    #[command(flatten)]
    custom: CustomOptions,
}

impl ListOptions {
    pub fn run(&self, app: &mut App) -> CliResult {
        let store = self
            .custom
            .create_store(TemperamentStore::default_scale_builder())?;

        for temperament in store.temperaments() {
            let inner = &temperament.temperament;
            app.writeln(format_args!(
                "{:>4} {:>3}  {:<8} {}",
                temperament.stable_id().unwrap_or_default(),
                inner.num_notes_per_octave(),
                inner.abbreviation(),
                inner.name(),
            ))?;
        }
        Ok(())
    }
}

#[derive(Args)]
pub(crate) struct ExportOptions {
    #[command(flatten)]
    custom: CustomOptions,

    /// Stable IDs of the temperaments to export [default: all predefined temperaments]
    #[arg(allow_negative_numbers = true)]
    stable_ids: Vec<i64>,
}

impl ExportOptions {
    pub fn run(&self, app: &mut App) -> CliResult {
        let store = self
            .custom
            .create_store(TemperamentStore::default_scale_builder())?;

        let temperaments = if self.stable_ids.is_empty() {
            store.predefined_temperaments().to_vec()
        } else {
            self.stable_ids
                .iter()
                .map(|&stable_id| {
                    store
                        .find(stable_id)
                        .cloned()
                        .handle_error(&format!("Unknown temperament {stable_id}"))
                })
                .collect::<CliResult<_>>()?
        };

        app.write(interchange::export(&temperaments))?;
        Ok(())
    }
}

#[derive(Args)]
pub(crate) struct CheckOptions {
    /// File to check [default: stdin]
    file_name: Option<PathBuf>,
}

impl CheckOptions {
    pub fn run(&self, app: &mut App) -> CliResult {
        let imported = match &self.file_name {
            Some(file_name) => {
                log::info!("Checking {}", file_name.display());
                ImportedTemperaments::import(File::open(file_name)?)?
            }
            None => ImportedTemperaments::import(app.read())?,
        };

        let dto = TemperDto::Check(CheckDto {
            file_check: format!("{:?}", imported.file_check),
            version: imported.version,
            temperaments: imported.temperaments.iter().map(check_temperament).collect(),
        });
        app.write(dto.to_yaml()?)?;
        Ok(())
    }
}

fn check_temperament(editable: &EditableTemperament) -> CheckedTemperamentDto {
    let (value_ordering, unordered) = editable.value_ordering();
    let (note_name_error, duplicates) = editable.note_name_error();
    CheckedTemperamentDto {
        name: editable.name.clone(),
        abbreviation: editable.abbreviation.clone(),
        num_notes_per_octave: editable.num_notes_per_octave(),
        value_ordering: format!("{value_ordering:?}"),
        unordered_lines: flagged_lines(&unordered),
        note_name_error: format!("{note_name_error:?}"),
        duplicate_note_lines: flagged_lines(&duplicates),
        has_errors: editable.has_errors(),
    }
}

fn flagged_lines(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(line, &flagged)| flagged.then_some(line))
        .collect()
}
