#![forbid(unsafe_code)]

//! Initial load and save payloads.
//!
//! The persisted shape is `{categoryId: slot}` with the heap omitted. A slot
//! is a list of column names for unbounded categories and a scalar for
//! single-capacity ones (empty string when nothing is applied):
//!
//! ```json
//! { "numeric": ["age", "income"], "target": "target_label" }
//! ```
//!
//! # Load normalization
//!
//! Prior assignments come from outside and may break the partition
//! invariant. Loading never fails; it normalizes with a **heap wins** policy
//! and records each fix in a [`LoadReport`]:
//!
//! - a column listed under two or more categories goes to the heap,
//! - a column listed under an unknown category goes to the heap,
//! - columns beyond a single-capacity category's first go to the heap,
//! - a column listed twice under the same category is placed once,
//! - a listed column that is not in the dataset is dropped,
//! - a dataset column repeated in the universe is kept once.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Capacity, Catalog, Item, ItemId};
use crate::distribution::Distribution;

/// One category's persisted contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    Many(Vec<String>),
    /// Scalar form; `None` and `""` both mean empty.
    One(Option<String>),
}

impl Slot {
    /// Column names in listed order, with empty scalars skipped.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Many(names) => names.iter().map(String::as_str).collect(),
            Self::One(Some(name)) if !name.is_empty() => vec![name.as_str()],
            Self::One(_) => Vec::new(),
        }
    }
}

/// Persisted `{categoryId: slot}` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<String, Slot>);

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, slot: Slot) -> Option<Slot> {
        self.0.insert(category.into(), slot)
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&Slot> {
        self.0.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromIterator<(String, Slot)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (String, Slot)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A normalization applied while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    DuplicateColumn { column: String },
    UnknownCategory { category: String },
    UnknownColumn { category: String, column: String },
    RepeatedMention { category: String, column: String },
    Conflicting { column: String, categories: Vec<String> },
    Overflow { category: String, column: String },
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateColumn { column } => {
                write!(f, "column {column} appears more than once in the dataset")
            }
            Self::UnknownCategory { category } => {
                write!(f, "unknown category {category}; its columns were unassigned")
            }
            Self::UnknownColumn { category, column } => {
                write!(f, "{category} lists unknown column {column}; dropped")
            }
            Self::RepeatedMention { category, column } => {
                write!(f, "{category} lists {column} more than once")
            }
            Self::Conflicting { column, categories } => write!(
                f,
                "{column} is listed under {}; unassigned",
                categories.join(", ")
            ),
            Self::Overflow { category, column } => {
                write!(f, "{category} holds a single column; {column} was unassigned")
            }
        }
    }
}

/// Everything normalized while loading a prior assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Distribution {
    /// Build the initial distribution from the dataset's columns and a
    /// prior (possibly empty) assignment.
    pub fn load(
        catalog: Arc<Catalog>,
        columns: impl IntoIterator<Item = impl Into<Item>>,
        prior: &Assignment,
    ) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        let mut universe: Vec<Item> = Vec::new();
        for item in columns.into_iter().map(Into::into) {
            if universe.iter().any(|seen| seen.id == item.id) {
                report.issues.push(LoadIssue::DuplicateColumn {
                    column: item.id.to_string(),
                });
            } else {
                universe.push(item);
            }
        }

        // First pass: which known categories mention each column. Heap
        // listings count, so heap plus a category is a conflict.
        let mut mentions: HashMap<&str, Vec<&str>> = HashMap::new();
        for (category, slot) in prior.iter() {
            if catalog.get(category).is_none() {
                report.issues.push(LoadIssue::UnknownCategory {
                    category: category.to_owned(),
                });
                continue;
            }
            for column in slot.columns() {
                if !universe.iter().any(|item| item.id.as_str() == column) {
                    report.issues.push(LoadIssue::UnknownColumn {
                        category: category.to_owned(),
                        column: column.to_owned(),
                    });
                    continue;
                }
                let listed = mentions.entry(column).or_default();
                if listed.contains(&category) {
                    report.issues.push(LoadIssue::RepeatedMention {
                        category: category.to_owned(),
                        column: column.to_owned(),
                    });
                } else {
                    listed.push(category);
                }
            }
        }

        for (column, categories) in &mentions {
            if categories.len() > 1 {
                report.issues.push(LoadIssue::Conflicting {
                    column: (*column).to_owned(),
                    categories: categories.iter().map(|c| (*c).to_owned()).collect(),
                });
            }
        }

        // Second pass: place uncontested columns in catalog order.
        let mut slots: Vec<Vec<ItemId>> = vec![Vec::new(); catalog.len()];
        for (index, bucket) in catalog.buckets().iter().enumerate() {
            if index == catalog.heap_index() {
                continue;
            }
            let Some(slot) = prior.get(bucket.id.as_str()) else {
                continue;
            };
            for column in slot.columns() {
                let uncontested = mentions.get(column).is_some_and(|c| c.len() == 1);
                if !uncontested || slots[index].iter().any(|id| id.as_str() == column) {
                    continue;
                }
                if !bucket.capacity.admits(slots[index].len()) {
                    report.issues.push(LoadIssue::Overflow {
                        category: bucket.id.to_string(),
                        column: column.to_owned(),
                    });
                    continue;
                }
                slots[index].push(ItemId::new(column));
            }
        }

        let placed: Vec<&ItemId> = slots.iter().flatten().collect();
        let heap: Vec<ItemId> = universe
            .iter()
            .filter(|item| !placed.contains(&&item.id))
            .map(|item| item.id.clone())
            .collect();
        slots[catalog.heap_index()] = heap;

        // HashMap iteration order is arbitrary; keep reports deterministic.
        report.issues.sort_by_key(|issue| issue.to_string());

        for issue in &report.issues {
            tracing::warn!(message = "load.normalized", issue = %issue);
        }
        tracing::debug!(
            message = "load.complete",
            columns = universe.len(),
            issues = report.issues.len()
        );

        let distribution = Distribution::from_parts(catalog, universe.into(), slots);
        debug_assert!(distribution.check_invariants().is_ok());
        (distribution, report)
    }

    /// The save payload: every non-heap bucket, heap excluded.
    #[must_use]
    pub fn to_assignment(&self) -> Assignment {
        self.buckets()
            .filter(|(bucket, _)| !self.catalog().is_heap(&bucket.id))
            .map(|(bucket, items)| {
                let slot = match bucket.capacity {
                    Capacity::Unbounded => {
                        Slot::Many(items.iter().map(ToString::to_string).collect())
                    }
                    Capacity::Single => Slot::One(Some(
                        items.first().map(ToString::to_string).unwrap_or_default(),
                    )),
                };
                (bucket.id.to_string(), slot)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Bucket;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(
                [
                    Bucket::unbounded("heap", "Unassigned"),
                    Bucket::unbounded("numeric", "Numeric"),
                    Bucket::unbounded("categorical", "Categorical"),
                    Bucket::single("target", "Target"),
                ],
                "heap",
            )
            .unwrap(),
        )
    }

    const COLUMNS: [&str; 5] = ["age", "income", "city", "churned", "id"];

    fn names(items: &[ItemId]) -> Vec<&str> {
        items.iter().map(ItemId::as_str).collect()
    }

    #[test]
    fn empty_prior_puts_everything_in_heap() {
        let (d, report) = Distribution::load(catalog(), COLUMNS, &Assignment::new());
        assert!(report.is_clean());
        assert_eq!(names(d.heap_items()), COLUMNS);
        d.check_invariants().unwrap();
    }

    #[test]
    fn prior_assignment_is_restored() {
        let prior = Assignment::from_json_str(
            r#"{"numeric": ["income", "age"], "categorical": ["city"], "target": "churned"}"#,
        )
        .unwrap();
        let (d, report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(names(d.items_in("numeric").unwrap()), ["income", "age"]);
        assert_eq!(names(d.items_in("categorical").unwrap()), ["city"]);
        assert_eq!(names(d.items_in("target").unwrap()), ["churned"]);
        assert_eq!(names(d.heap_items()), ["id"]);
    }

    #[test]
    fn empty_and_null_scalars_mean_empty() {
        let prior = Assignment::from_json_str(r#"{"target": "", "numeric": null}"#).unwrap();
        let (d, report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert!(report.is_clean());
        assert!(d.items_in("target").unwrap().is_empty());
        assert_eq!(d.heap_items().len(), COLUMNS.len());
    }

    #[test]
    fn conflicting_columns_go_to_heap() {
        let prior = Assignment::from_json_str(
            r#"{"numeric": ["age", "income"], "categorical": ["age"]}"#,
        )
        .unwrap();
        let (d, report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert_eq!(names(d.items_in("numeric").unwrap()), ["income"]);
        assert!(d.items_in("categorical").unwrap().is_empty());
        assert_eq!(d.locate("age").unwrap(), "heap");
        assert_eq!(
            report.issues,
            vec![LoadIssue::Conflicting {
                column: "age".into(),
                categories: vec!["categorical".into(), "numeric".into()],
            }]
        );
        d.check_invariants().unwrap();
    }

    #[test]
    fn single_overflow_and_unknowns_are_reported() {
        let mut prior = Assignment::new();
        prior.insert("target", Slot::Many(vec!["churned".into(), "id".into()]));
        prior.insert("ordinal", Slot::Many(vec!["city".into()]));
        prior.insert("numeric", Slot::Many(vec!["age".into(), "age".into(), "zip".into()]));

        let (d, report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert_eq!(names(d.items_in("target").unwrap()), ["churned"]);
        assert_eq!(names(d.items_in("numeric").unwrap()), ["age"]);
        assert_eq!(names(d.heap_items()), ["income", "city", "id"]);
        assert!(report.issues.contains(&LoadIssue::Overflow {
            category: "target".into(),
            column: "id".into(),
        }));
        assert!(report.issues.contains(&LoadIssue::UnknownCategory {
            category: "ordinal".into(),
        }));
        assert!(report.issues.contains(&LoadIssue::RepeatedMention {
            category: "numeric".into(),
            column: "age".into(),
        }));
        assert!(report.issues.contains(&LoadIssue::UnknownColumn {
            category: "numeric".into(),
            column: "zip".into(),
        }));
        assert_eq!(report.issues.len(), 4);
        d.check_invariants().unwrap();
    }

    #[test]
    fn duplicate_dataset_columns_collapse() {
        let (d, report) =
            Distribution::load(catalog(), ["age", "age", "income"], &Assignment::new());
        assert_eq!(names(d.heap_items()), ["age", "income"]);
        assert_eq!(
            report.issues,
            vec![LoadIssue::DuplicateColumn {
                column: "age".into()
            }]
        );
    }

    #[test]
    fn heap_and_category_listing_conflicts_into_heap() {
        let prior = Assignment::from_json_str(r#"{"heap": ["age"], "numeric": ["age"]}"#).unwrap();
        let (d, report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert_eq!(
            report.issues,
            vec![LoadIssue::Conflicting {
                column: "age".into(),
                categories: vec!["heap".into(), "numeric".into()],
            }]
        );
        assert_eq!(d.locate("age").unwrap(), "heap");
        assert!(d.items_in("numeric").unwrap().is_empty());
        d.check_invariants().unwrap();
    }

    #[test]
    fn heap_only_listing_stays_in_heap_without_issue() {
        let prior = Assignment::from_json_str(r#"{"heap": ["age"]}"#).unwrap();
        let (d, report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert!(report.is_clean());
        assert_eq!(d.locate("age").unwrap(), "heap");
    }

    #[test]
    fn save_excludes_heap_and_scalarizes_single_buckets() {
        let (d, _) = Distribution::load(catalog(), COLUMNS, &Assignment::new());
        let saved = d.to_assignment();
        assert_eq!(
            saved.to_json_string().unwrap(),
            r#"{"categorical":[],"numeric":[],"target":""}"#
        );

        let d = d.move_item("age", "numeric").move_item("churned", "target");
        let saved = d.to_assignment();
        assert!(saved.get("heap").is_none());
        assert_eq!(saved.get("numeric"), Some(&Slot::Many(vec!["age".into()])));
        assert_eq!(saved.get("target"), Some(&Slot::One(Some("churned".into()))));
        assert_eq!(
            saved.to_json_string().unwrap(),
            r#"{"categorical":[],"numeric":["age"],"target":"churned"}"#
        );
    }

    #[test]
    fn saved_assignment_reloads_to_same_distribution() {
        let (d, _) = Distribution::load(catalog(), COLUMNS, &Assignment::new());
        let d = d
            .move_item("income", "numeric")
            .move_item("city", "categorical")
            .move_item("churned", "target");
        let json = d.to_assignment().to_json_string().unwrap();
        let (reloaded, report) =
            Distribution::load(catalog(), COLUMNS, &Assignment::from_json_str(&json).unwrap());
        assert!(report.is_clean());
        assert_eq!(reloaded, d);
    }
}
