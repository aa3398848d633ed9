use std::{fmt::Display, str::FromStr};

use hashbrown::HashMap;

use crate::item::{NameError, PracticeItem};

///Label of the synthetic bucket holding every item not yet practiced.
pub const REMAINING_LABEL: &str = "To do";

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct SubjectProgress {
    pub subject: String,
    pub completed: usize,
    pub total: usize,
}

impl SubjectProgress {
    pub fn percent(&self) -> f64 {
        percent_of(self.completed, self.total)
    }
}

///Completion per subject, derived from the working model each time it is shown.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct ProgressSnapshot {
    pub subjects: Vec<SubjectProgress>,
    pub remaining: usize,
    pub total: usize,
}

fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

///Groups items by the subject parsed from each item's own name, keeping
///subjects in the order they are first seen.
pub fn summarize(items: &[PracticeItem]) -> Result<ProgressSnapshot, NameError> {
    let mut subjects: Vec<SubjectProgress> = vec![];
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut completed_all = 0;

    for item in items {
        let subject = item.name.subject()?;
        let position = *positions.entry(subject).or_insert_with(|| {
            subjects.push(SubjectProgress {
                subject: subject.to_owned(),
                completed: 0,
                total: 0,
            });
            subjects.len() - 1
        });

        let progress = &mut subjects[position];
        progress.total += 1;
        if item.is_completed() {
            progress.completed += 1;
            completed_all += 1;
        }
    }

    Ok(ProgressSnapshot {
        subjects,
        remaining: items.len() - completed_all,
        total: items.len(),
    })
}

impl ProgressSnapshot {
    pub fn completed(&self) -> usize {
        self.total - self.remaining
    }

    pub fn remaining_percent(&self) -> f64 {
        percent_of(self.remaining, self.total)
    }

    ///Completed count per subject, followed by the remaining bucket.
    pub fn counts(&self) -> Vec<(String, f64)> {
        self.values(|progress| progress.completed as f64, self.remaining as f64)
    }

    ///Each subject as a percentage of its own items, followed by the
    ///remaining bucket as a percentage of all items.
    pub fn percentages(&self) -> Vec<(String, f64)> {
        self.values(SubjectProgress::percent, self.remaining_percent())
    }

    pub fn values_for(&self, mode: ChartMode) -> Vec<(String, f64)> {
        match mode {
            ChartMode::Count => self.counts(),
            ChartMode::Percent => self.percentages(),
        }
    }

    fn values(&self, value: impl Fn(&SubjectProgress) -> f64, remaining: f64) -> Vec<(String, f64)> {
        let mut buf = Vec::with_capacity(self.subjects.len() + 1);
        self.subjects
            .iter()
            .for_each(|progress| buf.push((progress.subject.clone(), value(progress))));
        buf.push((REMAINING_LABEL.to_owned(), remaining));
        buf
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChartMode {
    #[default]
    Count,
    Percent,
}

impl FromStr for ChartMode {
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        if s == "count" {
            Ok(Self::Count)
        } else if s == "percent" {
            Ok(Self::Percent)
        } else {
            Err(format!("Chart mode argument not recognized: {s}"))
        }
    }

    type Err = String;
}

impl Display for ChartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChartMode::Count => "count",
            ChartMode::Percent => "percent",
        })
    }
}
