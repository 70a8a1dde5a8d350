use bevy::prelude::*;
use thiserror::Error;

/// The base part is the chassis every stage builds on: always visible once
/// shown, never animated, never recoloured. Every group must include it.
pub const BASE_PART: usize = 0;

/// One stage of the reveal sequence: the full set of part indices visible
/// while the stage is active, plus the labels the host card displays.
#[derive(Debug, Clone)]
pub struct RevealGroup {
    pub name: String,
    pub icon: String,
    pub size: String,
    pub parts: Vec<usize>,
}

impl RevealGroup {
    pub fn contains(&self, part: usize) -> bool {
        self.parts.contains(&part)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupTableError {
    #[error("group table is empty")]
    EmptyTable,
    #[error("group {group} ('{name}') omits the base part")]
    MissingBasePart { group: usize, name: String },
    #[error("group {group} ('{name}') references part {part}, model has {part_count} parts")]
    PartOutOfRange {
        group: usize,
        name: String,
        part: usize,
        part_count: usize,
    },
}

/// Ordered reveal stages, taken verbatim from the scene manifest. The table
/// is pure configuration; nothing about group membership is hard-coded.
#[derive(Resource, Debug, Clone)]
pub struct GroupTable {
    groups: Vec<RevealGroup>,
}

impl GroupTable {
    /// A table is well-formed only if every group keeps the base part in:
    /// the chassis never leaves the screen, so a group without it would make
    /// the diff and the "always visible" guarantee disagree.
    pub fn new(groups: Vec<RevealGroup>) -> Result<Self, GroupTableError> {
        if groups.is_empty() {
            return Err(GroupTableError::EmptyTable);
        }
        for (index, group) in groups.iter().enumerate() {
            if !group.contains(BASE_PART) {
                return Err(GroupTableError::MissingBasePart {
                    group: index,
                    name: group.name.clone(),
                });
            }
        }
        Ok(Self { groups })
    }

    /// Fail fast on a group referencing a part the model does not have,
    /// before any transition can reach it.
    pub fn validate_against(&self, part_count: usize) -> Result<(), GroupTableError> {
        for (index, group) in self.groups.iter().enumerate() {
            if let Some(&part) = group.parts.iter().find(|&&p| p >= part_count) {
                return Err(GroupTableError::PartOutOfRange {
                    group: index,
                    name: group.name.clone(),
                    part,
                    part_count,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RevealGroup> {
        self.groups.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, parts: &[usize]) -> RevealGroup {
        RevealGroup {
            name: name.to_string(),
            icon: "fa-cube".to_string(),
            size: "1x1".to_string(),
            parts: parts.to_vec(),
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(GroupTable::new(Vec::new()).unwrap_err(), GroupTableError::EmptyTable);
    }

    #[test]
    fn group_omitting_the_base_part_is_rejected() {
        let error =
            GroupTable::new(vec![group("base", &[0]), group("floating", &[1, 2])]).unwrap_err();
        assert_eq!(
            error,
            GroupTableError::MissingBasePart {
                group: 1,
                name: "floating".to_string(),
            }
        );
    }

    #[test]
    fn out_of_range_part_is_reported_with_context() {
        let table = GroupTable::new(vec![group("base", &[0]), group("full", &[0, 1, 9])]).unwrap();
        assert_eq!(
            table.validate_against(4).unwrap_err(),
            GroupTableError::PartOutOfRange {
                group: 1,
                name: "full".to_string(),
                part: 9,
                part_count: 4,
            }
        );
    }

    #[test]
    fn table_within_part_count_validates() {
        let table = GroupTable::new(vec![group("base", &[0]), group("full", &[0, 1, 2, 3])]).unwrap();
        assert!(table.validate_against(4).is_ok());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().parts, vec![0, 1, 2, 3]);
    }
}
