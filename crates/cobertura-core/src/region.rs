//! PDET region classifier
//!
//! Splits departments by how many PDET (territorially prioritized)
//! municipalities they contain. Department names from the municipality list
//! are matched to the coverage table's names case- and accent-insensitively.

use crate::selection::Group;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

/// Minimum PDET municipalities for a department to be "high concentration"
pub const HIGH_CONCENTRATION_MIN: usize = 5;

/// A department with its PDET municipality count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentPdet {
    pub department: String,
    pub municipality_count: usize,
}

/// Partition of departments into high and low PDET concentration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PdetClassification {
    pub high_concentration: Vec<DepartmentPdet>,
    pub low_concentration: Vec<DepartmentPdet>,
    /// Threshold used for the split
    pub threshold: usize,
    /// Group by exact department name
    #[serde(skip)]
    by_name: HashMap<String, Group>,
    /// Group by matching key; the first department wins when keys collide
    #[serde(skip)]
    by_key: HashMap<String, Group>,
}

impl PdetClassification {
    /// Classify with the default threshold
    pub fn classify<M, D>(municipality_departments: &[M], departments: &[D]) -> Self
    where
        M: AsRef<str>,
        D: AsRef<str>,
    {
        Self::classify_with_threshold(municipality_departments, departments, HIGH_CONCENTRATION_MIN)
    }

    /// Classify with an explicit threshold
    ///
    /// `municipality_departments` holds one department name per PDET
    /// municipality. Departments of `departments` absent from it count zero.
    /// Each distinct department name lands in exactly one group, in input
    /// order. Names that differ only in accents or punctuation stay separate
    /// entries and share the municipality count of their matching key.
    pub fn classify_with_threshold<M, D>(
        municipality_departments: &[M],
        departments: &[D],
        threshold: usize,
    ) -> Self
    where
        M: AsRef<str>,
        D: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for name in municipality_departments {
            *counts.entry(department_key(name.as_ref())).or_insert(0) += 1;
        }

        let mut matched = HashSet::new();
        let mut classification = Self {
            threshold,
            ..Self::default()
        };
        for department in departments {
            let department = department.as_ref().trim();
            if classification.by_name.contains_key(department) {
                continue;
            }
            let key = department_key(department);

            let entry = DepartmentPdet {
                department: department.to_string(),
                municipality_count: counts.get(&key).copied().unwrap_or(0),
            };
            let group = if entry.municipality_count >= threshold {
                classification.high_concentration.push(entry);
                Group::High
            } else {
                classification.low_concentration.push(entry);
                Group::Low
            };
            classification
                .by_name
                .insert(department.to_string(), group);
            classification.by_key.entry(key.clone()).or_insert(group);
            matched.insert(key);
        }

        let unmatched: Vec<&String> = counts.keys().filter(|k| !matched.contains(*k)).collect();
        if !unmatched.is_empty() {
            tracing::warn!(
                "PDET municipalities reference unknown departments: {:?}",
                unmatched
            );
        }

        tracing::info!(
            "Classified departments: {} high PDET concentration, {} low (threshold {})",
            classification.high_concentration.len(),
            classification.low_concentration.len(),
            threshold
        );
        classification
    }

    /// Department names of one group
    pub fn members(&self, group: Group) -> Vec<&str> {
        let entries = match group {
            Group::High => &self.high_concentration,
            Group::Low => &self.low_concentration,
        };
        entries.iter().map(|d| d.department.as_str()).collect()
    }

    /// Group of a department, `None` when it was not classified
    ///
    /// Exact names are looked up directly; other spellings fall back to
    /// the matching key.
    pub fn group_of(&self, department: &str) -> Option<Group> {
        let department = department.trim();
        if let Some(group) = self.by_name.get(department) {
            return Some(*group);
        }
        self.by_key.get(&department_key(department)).copied()
    }

    /// Whether a department is in the high-concentration group
    pub fn is_high(&self, department: &str) -> bool {
        self.group_of(department) == Some(Group::High)
    }

    /// Total number of classified departments
    pub fn len(&self) -> usize {
        self.high_concentration.len() + self.low_concentration.len()
    }

    /// Whether no department was classified
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Matching key for department names: accents stripped, upper case,
/// punctuation dropped, whitespace collapsed
pub fn department_key(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
