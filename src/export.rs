/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Revisr.
 *
 * Revisr is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Revisr is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Revisr.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::{
    fmt::Display,
    io::Write,
    path::{Path, PathBuf},
};

use hashbrown::HashMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{info, warn};

use crate::{
    catalog::{Catalog, Subject, Subtopic},
    item::{NameError, PracticeItem},
};

pub const DEFAULT_EXPORT_FILE: &str = "data.json";

const INDENT: &[u8] = b"    ";

///Rebuilds the nested catalog from the flat model. Subjects appear in the
///order they are first seen, subtopics in the order of their items.
pub fn to_catalog(items: &[PracticeItem]) -> Result<Catalog, NameError> {
    let mut subjects: Vec<Subject> = vec![];
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let (subject, subtopic) = item.name.split()?;
        let position = *positions.entry(subject).or_insert_with(|| {
            subjects.push(Subject {
                name: subject.to_owned(),
                subtopics: vec![],
            });
            subjects.len() - 1
        });

        subjects[position].subtopics.push(Subtopic {
            name: subtopic.to_owned(),
            counter: item.counter,
        });
    }

    Ok(Catalog { subjects })
}

pub fn to_pretty_json(catalog: &Catalog) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    catalog.serialize(&mut serializer)?;
    Ok(buf)
}

///Writes next to the target first, then renames, so an interrupted save
///never leaves a truncated catalog behind.
pub fn save_catalog(catalog: &Catalog, path: impl Into<PathBuf>) -> Result<(), ExportError> {
    let path: PathBuf = path.into();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|err| ExportError::Io(path.clone(), err))?;
        }
    }

    let json = to_pretty_json(catalog).map_err(ExportError::Serde)?;
    let tmp_path = path.with_extension("tmp");

    {
        let mut file = std::fs::File::create(&tmp_path)
            .map_err(|err| ExportError::Io(tmp_path.clone(), err))?;
        file.write_all(&json)
            .and_then(|_| file.sync_all())
            .map_err(|err| discard_tmp(&tmp_path, ExportError::Io(tmp_path.clone(), err)))?;
    }

    std::fs::rename(&tmp_path, &path)
        .map_err(|err| discard_tmp(&tmp_path, ExportError::Io(path.clone(), err)))?;

    info!(
        path = %path.display(),
        subjects = catalog.len(),
        items = catalog.item_count(),
        "catalog exported"
    );

    Ok(())
}

fn discard_tmp(tmp_path: &Path, err: ExportError) -> ExportError {
    if let Err(remove_err) = std::fs::remove_file(tmp_path) {
        warn!(path = %tmp_path.display(), %remove_err, "unable to remove temporary export");
    }
    err
}

pub fn export_items(items: &[PracticeItem], path: impl Into<PathBuf>) -> Result<(), ExportError> {
    let catalog = to_catalog(items)?;
    save_catalog(&catalog, path)
}

#[derive(Debug)]
pub enum ExportError {
    Name(NameError),
    Io(PathBuf, std::io::Error),
    Serde(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(err) => f.write_fmt(format_args!("NameError: {err}")),
            Self::Io(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::Serde(err) => f.write_fmt(format_args!("SerdeError: {err}")),
        }
    }
}

impl From<NameError> for ExportError {
    fn from(err: NameError) -> Self {
        Self::Name(err)
    }
}
