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

use std::{fmt::Display, ops::Deref};

///Separates the subject from the subtopic in a qualified name.
pub const DELIMITER: &str = ": ";

///Name of a single practice item, formatted as `"<subject>: <subtopic>"`.
///
///Subject names never contain [`DELIMITER`] (the catalog loader rejects them),
///so splitting on the first occurrence recovers both halves losslessly.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(subject: &str, subtopic: &str) -> Self {
        Self(format!("{subject}{DELIMITER}{subtopic}"))
    }

    ///Splits into `(subject, subtopic)` on the first delimiter.
    ///
    ///```
    ///# use revisr::item::QualifiedName;
    ///let name = QualifiedName::new("Math", "Ratios: part 2");
    ///assert_eq!(name.split().ok(), Some(("Math", "Ratios: part 2")));
    ///```
    pub fn split(&self) -> Result<(&str, &str), NameError> {
        self.0
            .split_once(DELIMITER)
            .ok_or_else(|| NameError::MissingDelimiter(self.0.clone()))
    }

    pub fn subject(&self) -> Result<&str, NameError> {
        self.split().map(|(subject, _)| subject)
    }
}

impl Deref for QualifiedName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PracticeItem {
    pub name: QualifiedName,
    pub counter: u64,
}

impl PracticeItem {
    pub fn new(name: impl Into<QualifiedName>, counter: u64) -> Self {
        Self {
            name: name.into(),
            counter,
        }
    }

    ///An item counts as completed once it has been practiced at least once.
    pub fn is_completed(&self) -> bool {
        self.counter > 0
    }
}

impl Display for PracticeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{} (Repeated {} times)",
            self.name, self.counter
        ))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum NameError {
    MissingDelimiter(String),
}

impl Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDelimiter(name) => f.write_fmt(format_args!(
                "MissingDelimiter: \"{name}\" does not contain \"{DELIMITER}\""
            )),
        }
    }
}
