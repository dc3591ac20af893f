//! Grouping of harvested clue records by category

use crate::model::{CategorizedRecord, ClueRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All records harvested for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub content: Vec<ClueRecord>,
}

/// Records grouped by category label
///
/// Categories appear in the order they were first seen; records within a
/// category keep their arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedResult {
    groups: Vec<CategoryGroup>,
}

impl AggregatedResult {
    /// Groups a finished stream of records
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CategorizedRecord>,
    {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for CategorizedRecord { category, record } in records {
            match index.get(&category) {
                Some(&slot) => groups[slot].content.push(record),
                None => {
                    index.insert(category.clone(), groups.len());
                    groups.push(CategoryGroup {
                        category,
                        content: vec![record],
                    });
                }
            }
        }

        Self { groups }
    }

    /// Category groups in first-seen order
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Records of one category, if any were harvested
    pub fn category(&self, label: &str) -> Option<&[ClueRecord]> {
        self.groups
            .iter()
            .find(|g| g.category == label)
            .map(|g| g.content.as_slice())
    }

    /// Number of categories
    pub fn category_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all categories
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.content.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Flattens back into tagged records, category by category
    pub fn into_records(self) -> Vec<CategorizedRecord> {
        self.groups
            .into_iter()
            .flat_map(|group| {
                let category = group.category;
                group.content.into_iter().map(move |record| CategorizedRecord {
                    category: category.clone(),
                    record,
                })
            })
            .collect()
    }

    pub fn into_groups(self) -> Vec<CategoryGroup> {
        self.groups
    }
}
