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
    ops::Deref,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::item::{PracticeItem, QualifiedName, DELIMITER};

///Nested subject catalog, the format read at startup and written on export.
///Every subject holds an ordered list of subtopics, each with the number of
///times it has been practiced. A missing counter is treated as zero.
///
///Example:
///```
///# use revisr::catalog::Catalog;
///let json = r#"{
///  "subjects": [
///    {
///      "name": "Math",
///      "subtopics": [
///        { "name": "Algebra", "counter": 2 },
///        { "name": "Geometry" }
///      ]
///    }
///  ]
///}"#;
///let value = serde_json::from_str(json).unwrap();
///assert!(Catalog::from_value(&value).is_ok_and(|catalog| {
///  let items = catalog.flatten();
///  items.len() == 2 && *items[0].name == "Math: Algebra" && items[1].counter == 0
///}));
///```
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Catalog {
    pub subjects: Vec<Subject>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Subject {
    pub name: String,
    pub subtopics: Vec<Subtopic>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Subtopic {
    pub name: String,
    #[serde(default)]
    pub counter: u64,
}

impl Deref for Catalog {
    type Target = Vec<Subject>;

    fn deref(&self) -> &Self::Target {
        &self.subjects
    }
}

impl Catalog {
    ///Validates the whole document before building anything, so a malformed
    ///entry anywhere rejects the catalog as a whole.
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        let root = value.as_object().ok_or(FormatError::NotAnObject)?;
        let subjects = root
            .get("subjects")
            .and_then(Value::as_array)
            .ok_or(FormatError::MissingSubjects)?;

        let subjects = subjects
            .iter()
            .enumerate()
            .map(|(index, subject)| parse_subject(index, subject))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self { subjects };
        validate_catalog(&catalog)?;

        Ok(catalog)
    }

    ///Flattens subject-then-subtopic, in document order.
    pub fn flatten(&self) -> Vec<PracticeItem> {
        let mut items = Vec::with_capacity(self.item_count());

        for subject in self.iter() {
            for subtopic in subject.subtopics.iter() {
                items.push(PracticeItem::new(
                    QualifiedName::new(&subject.name, &subtopic.name),
                    subtopic.counter,
                ));
            }
        }

        items
    }

    pub fn item_count(&self) -> usize {
        self.iter()
            .fold(0, |total, subject| total + subject.subtopics.len())
    }
}

fn usable_name(object: &Map<String, Value>) -> Option<&str> {
    object
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

fn parse_subject(index: usize, value: &Value) -> Result<Subject, FormatError> {
    let object = value
        .as_object()
        .ok_or(FormatError::SubjectNotAnObject(index))?;
    let name = usable_name(object).ok_or(FormatError::SubjectMissingName(index))?;

    if name.contains(DELIMITER) {
        return Err(FormatError::SubjectNameContainsDelimiter(name.to_owned()));
    }

    let subtopics = object
        .get("subtopics")
        .and_then(Value::as_array)
        .ok_or_else(|| FormatError::SubtopicsNotSequence(name.to_owned()))?
        .iter()
        .enumerate()
        .map(|(index, subtopic)| parse_subtopic(name, index, subtopic))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Subject {
        name: name.to_owned(),
        subtopics,
    })
}

fn parse_subtopic(subject: &str, index: usize, value: &Value) -> Result<Subtopic, FormatError> {
    let name = value
        .as_object()
        .and_then(usable_name)
        .ok_or_else(|| FormatError::SubtopicMissingName(subject.to_owned(), index))?;

    let counter = match value.get("counter") {
        None | Some(Value::Null) => 0,
        Some(counter) => counter
            .as_u64()
            .ok_or_else(|| FormatError::InvalidCounter(QualifiedName::new(subject, name)))?,
    };

    Ok(Subtopic {
        name: name.to_owned(),
        counter,
    })
}

fn validate_catalog(catalog: &Catalog) -> Result<(), FormatError> {
    if let Some(name) = catalog.iter().enumerate().find_map(|(i, subject_a)| {
        catalog
            .iter()
            .skip(i + 1)
            .any(|subject_b| subject_a.name == subject_b.name)
            .then_some(&subject_a.name)
    }) {
        return Err(FormatError::DuplicateSubject(name.clone()));
    }

    Ok(())
}

pub fn load_catalog(path: impl Into<PathBuf>) -> Result<Catalog, CatalogError> {
    let path = path.into();
    let json =
        std::fs::read_to_string(&path).map_err(|err| CatalogError::Io(path.clone(), err))?;
    let value: Value =
        serde_json::from_str(&json).map_err(|err| CatalogError::Serde(path.clone(), err))?;
    let catalog = Catalog::from_value(&value).map_err(|err| CatalogError::Format(path, err))?;

    debug!(
        subjects = catalog.len(),
        items = catalog.item_count(),
        "catalog parsed"
    );

    Ok(catalog)
}

///Reads the catalog at `path` and flattens it into the working model.
pub fn load_items(path: impl Into<PathBuf>) -> Result<Vec<PracticeItem>, CatalogError> {
    load_catalog(path).map(|catalog| catalog.flatten())
}

#[derive(Debug, PartialEq, Eq)]
pub enum FormatError {
    NotAnObject,
    MissingSubjects,
    SubjectNotAnObject(usize),
    SubjectMissingName(usize),
    SubjectNameContainsDelimiter(String),
    DuplicateSubject(String),
    SubtopicsNotSequence(String),
    SubtopicMissingName(String, usize),
    InvalidCounter(QualifiedName),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("NotAnObject: Catalog root must be a JSON object"),
            Self::MissingSubjects => f.write_str(
                "MissingSubjects: Catalog must contain a \"subjects\" array",
            ),
            Self::SubjectNotAnObject(index) => f.write_fmt(format_args!(
                "SubjectNotAnObject: Subject at index {index} is not an object"
            )),
            Self::SubjectMissingName(index) => f.write_fmt(format_args!(
                "SubjectMissingName: Subject at index {index} does not have a usable name"
            )),
            Self::SubjectNameContainsDelimiter(name) => f.write_fmt(format_args!(
                "SubjectNameContainsDelimiter: Subject \"{name}\" contains \"{DELIMITER}\""
            )),
            Self::DuplicateSubject(name) => f.write_fmt(format_args!(
                "DuplicateSubject: At least two subjects have the same name, {name}"
            )),
            Self::SubtopicsNotSequence(name) => f.write_fmt(format_args!(
                "SubtopicsNotSequence: Subject \"{name}\" does not have a \"subtopics\" array"
            )),
            Self::SubtopicMissingName(name, index) => f.write_fmt(format_args!(
                "SubtopicMissingName: Subtopic at index {index} of subject \"{name}\" does not have a usable name"
            )),
            Self::InvalidCounter(name) => f.write_fmt(format_args!(
                "InvalidCounter: \"{name}\" has a counter that is not a non-negative integer"
            )),
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(PathBuf, std::io::Error),
    Serde(PathBuf, serde_json::Error),
    Format(PathBuf, FormatError),
}

impl CatalogError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io(path, _) | Self::Serde(path, _) | Self::Format(path, _) => path,
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path().to_str().unwrap_or("unknown");
        match self {
            Self::Io(_, err) => f.write_fmt(format_args!("IoError: {err}, path: {path}")),
            Self::Serde(_, err) => f.write_fmt(format_args!("SerdeError: {err}, path: {path}")),
            Self::Format(_, err) => f.write_fmt(format_args!("FormatError: {err}, path: {path}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::item::PracticeItem;

    use super::{load_catalog, load_items, Catalog, CatalogError, FormatError};

    #[test]
    fn load_items_from_file() {
        let items = load_items("./tests/catalog.json").expect("Unable to load test catalog");
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], PracticeItem::new("Math: Algebra", 1));
        assert_eq!(items[1], PracticeItem::new("Math: Geometry", 0));
        assert_eq!(items[2], PracticeItem::new("Math: Calculus", 4));
        assert_eq!(items[3], PracticeItem::new("Bio: Cells", 2));
        assert_eq!(items[4], PracticeItem::new("Bio: Genetics", 0));
    }

    #[test]
    fn flatten_is_deterministic() {
        let catalog = load_catalog("./tests/catalog.json").expect("Unable to load test catalog");
        assert_eq!(catalog.flatten(), catalog.flatten());
    }

    #[test]
    fn load_missing_counter_defaults_to_zero() {
        let items =
            load_items("./tests/missing_counter.json").expect("Unable to load missing counter");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.counter == 0));
    }

    #[test]
    fn load_empty_catalog() {
        let items = load_items("./tests/empty.json").expect("Unable to load empty catalog");
        assert!(items.is_empty());
        assert!(Catalog::default().flatten().is_empty());
    }

    #[test]
    fn load_missing_file() {
        assert!(load_items("./tests/does_not_exist.json")
            .is_err_and(|err| matches!(err, CatalogError::Io(_, _))));
    }

    #[test]
    fn load_invalid_json() {
        assert!(load_items("./tests/invalid.json")
            .is_err_and(|err| matches!(err, CatalogError::Serde(_, _))));
    }

    #[test]
    fn load_no_subjects() {
        assert!(load_items("./tests/no_subjects.json").is_err_and(|err| matches!(
            err,
            CatalogError::Format(_, FormatError::MissingSubjects)
        )));
    }

    #[test]
    fn load_subject_missing_name() {
        assert!(
            load_items("./tests/subject_missing_name.json").is_err_and(|err| matches!(
                err,
                CatalogError::Format(_, FormatError::SubjectMissingName(1))
            ))
        );
    }

    #[test]
    fn load_subtopics_not_sequence() {
        assert!(
            load_items("./tests/subtopics_not_sequence.json").is_err_and(|err| matches!(
                err,
                CatalogError::Format(_, FormatError::SubtopicsNotSequence(_))
            ))
        );
    }

    #[test]
    fn load_subtopic_missing_name() {
        assert!(
            load_items("./tests/subtopic_missing_name.json").is_err_and(|err| matches!(
                err,
                CatalogError::Format(_, FormatError::SubtopicMissingName(_, 0))
            ))
        );
    }

    #[test]
    fn load_duplicate_subject() {
        assert!(
            load_items("./tests/duplicate_subject.json").is_err_and(|err| matches!(
                err,
                CatalogError::Format(_, FormatError::DuplicateSubject(_))
            ))
        );
    }

    #[test]
    fn root_must_be_object() {
        assert_eq!(
            Catalog::from_value(&json!([{ "name": "Math", "subtopics": [] }])),
            Err(FormatError::NotAnObject)
        );
    }

    #[test]
    fn subject_name_must_not_be_empty() {
        let value = json!({ "subjects": [{ "name": "", "subtopics": [] }] });
        assert_eq!(
            Catalog::from_value(&value),
            Err(FormatError::SubjectMissingName(0))
        );
    }

    #[test]
    fn subject_name_with_delimiter() {
        let value = json!({ "subjects": [{ "name": "Math: Pure", "subtopics": [] }] });
        assert_eq!(
            Catalog::from_value(&value),
            Err(FormatError::SubjectNameContainsDelimiter(
                "Math: Pure".to_owned()
            ))
        );
    }

    #[test]
    fn null_counter_defaults_to_zero() {
        let value = json!({
            "subjects": [{ "name": "Math", "subtopics": [{ "name": "Algebra", "counter": null }] }]
        });
        let catalog = Catalog::from_value(&value).expect("Unable to parse null counter");
        assert_eq!(catalog[0].subtopics[0].counter, 0);
    }

    #[test]
    fn negative_counter_is_rejected() {
        let value = json!({
            "subjects": [{ "name": "Math", "subtopics": [{ "name": "Algebra", "counter": -1 }] }]
        });
        assert!(Catalog::from_value(&value)
            .is_err_and(|err| matches!(err, FormatError::InvalidCounter(_))));
    }

    #[test]
    fn malformed_entry_rejects_whole_catalog() {
        let value = json!({
            "subjects": [
                { "name": "Math", "subtopics": [{ "name": "Algebra", "counter": 1 }] },
                { "name": "Bio", "subtopics": [{ "counter": 2 }] }
            ]
        });
        assert_eq!(
            Catalog::from_value(&value),
            Err(FormatError::SubtopicMissingName("Bio".to_owned(), 0))
        );
    }
}
