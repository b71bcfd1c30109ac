//! Code -> display name lookups built from `CLASS_INF`.

use std::collections::HashMap;

use crate::data::ClassObj;
use crate::domain::Grouping;

pub const TIME_AXIS: &str = "time";
pub const CATEGORY_AXIS: &str = "cat01";
pub const BRANCH_AXIS: &str = "cat03";

/// Names for one classification axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLookup {
    names: HashMap<String, String>,
}

impl CodeLookup {
    pub fn from_axis(axis: &ClassObj) -> Self {
        let names = axis
            .class
            .as_slice()
            .iter()
            .map(|entry| (entry.code.clone(), entry.name.clone()))
            .collect();
        Self { names }
    }

    /// Display name for `code`, or the code itself when the axis does not list
    /// it or lists it with an empty name.
    pub fn name_of<'a>(&'a self, code: &'a str) -> &'a str {
        self.names
            .get(code)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(code)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.names.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookups {
    pub time: CodeLookup,
    pub category: CodeLookup,
    /// Empty in region grouping.
    pub branch: CodeLookup,
}

/// Build lookups for the axes the grouping needs. Axes absent from the
/// metadata yield empty lookups.
pub fn build_lookups(axes: &[ClassObj], grouping: Grouping) -> Lookups {
    let mut lookups = Lookups::default();
    for axis in axes {
        match axis.id.as_str() {
            TIME_AXIS => lookups.time = CodeLookup::from_axis(axis),
            CATEGORY_AXIS => lookups.category = CodeLookup::from_axis(axis),
            BRANCH_AXIS if grouping == Grouping::Branch => lookups.branch = CodeLookup::from_axis(axis),
            _ => {}
        }
    }
    lookups
}
