use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::stats;

/// Rows of a slice grouped by a key, in sorted key order
#[derive(Debug)]
pub struct GroupBy<'a, K, T>
where
    K: Debug + Ord + Clone,
{
    /// Row indices per key
    groups: BTreeMap<K, Vec<usize>>,

    /// Grouped rows
    source: &'a [T],
}

/// Mean of one group, with the count of observations the value function rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMean {
    /// `None` when no observation in the group was usable
    pub mean: Option<f64>,
    /// Observations that contributed to the mean
    pub count: usize,
    /// Observations skipped because the value function returned `None`
    pub excluded: usize,
}

impl<'a, K, T> GroupBy<'a, K, T>
where
    K: Debug + Ord + Clone,
{
    /// Group `source` by the key extracted from each row
    pub fn new<F>(source: &'a [T], key: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
        for (i, row) in source.iter().enumerate() {
            groups.entry(key(row)).or_default().push(i);
        }

        GroupBy { groups, source }
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    /// Size of each group
    pub fn size(&self) -> BTreeMap<K, usize> {
        self.groups
            .iter()
            .map(|(k, indices)| (k.clone(), indices.len()))
            .collect()
    }

    /// Rows belonging to `key`
    pub fn get_group(&self, key: &K) -> Vec<&'a T> {
        self.groups
            .get(key)
            .map(|indices| indices.iter().map(|&i| &self.source[i]).collect())
            .unwrap_or_default()
    }

    /// Mean of `value` per group, skipping rows where it returns `None`
    pub fn mean<F>(&self, value: F) -> BTreeMap<K, GroupMean>
    where
        F: Fn(&T) -> Option<f64>,
    {
        self.groups
            .iter()
            .map(|(key, indices)| {
                let values: Vec<f64> = indices
                    .iter()
                    .filter_map(|&i| value(&self.source[i]))
                    .collect();
                let group_mean = GroupMean {
                    mean: stats::mean(&values),
                    count: values.len(),
                    excluded: indices.len() - values.len(),
                };
                (key.clone(), group_mean)
            })
            .collect()
    }
}
