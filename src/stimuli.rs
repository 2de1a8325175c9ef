//! Stimulus and filler pool parsing.
//!
//! Stimuli arrive as blank-line-separated blocks of exactly `no_conds`
//! lines, one line per condition, in condition order. Fillers are one
//! per line. Identifiers are dense and 1-based, assigned in file order.

use crate::error::{Error, Result};
use std::path::Path;

/// A stimulus with one text payload per condition.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: u32,
    conditions: Vec<String>,
}

impl Item {
    pub fn new(id: u32, conditions: Vec<String>) -> Self {
        Self { id, conditions }
    }

    /// Text payload for 1-based condition index `cond`.
    pub fn condition(&self, cond: u32) -> Option<&str> {
        let idx = cond.checked_sub(1)? as usize;
        self.conditions.get(idx).map(String::as_str)
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}

/// A non-experimental stimulus with a single text payload.
#[derive(Debug, Clone)]
pub struct Filler {
    pub id: u32,
    pub text: String,
}

/// Parse the stimuli file into items, enforcing the condition-count
/// invariant per block.
pub fn parse_items(text: &str, no_conds: u32) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut block: Vec<String> = Vec::new();
    let mut next_id: u32 = 1;

    let mut flush = |block: &mut Vec<String>, next_id: &mut u32| -> Result<()> {
        if block.is_empty() {
            return Ok(());
        }
        if block.len() != no_conds as usize {
            return Err(Error::ConditionCountMismatch {
                item: *next_id,
                found: block.len(),
                expected: no_conds,
            });
        }
        items.push(Item::new(*next_id, std::mem::take(block)));
        *next_id += 1;
        Ok(())
    };

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            flush(&mut block, &mut next_id)?;
        } else {
            block.push(line.to_string());
        }
    }
    flush(&mut block, &mut next_id)?;

    Ok(items)
}

/// Parse the fillers file, one filler per non-empty line.
pub fn parse_fillers(text: &str) -> Vec<Filler> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(idx, line)| Filler {
            id: idx as u32 + 1,
            text: line.to_string(),
        })
        .collect()
}

pub fn load_items(path: &Path, no_conds: u32) -> Result<Vec<Item>> {
    let text = read_input(path)?;
    parse_items(&text, no_conds)
}

pub fn load_fillers(path: &Path) -> Result<Vec<Filler>> {
    let text = read_input(path)?;
    Ok(parse_fillers(&text))
}

pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_blank_separated_blocks() {
        let text = "the cat sees the dogs\nthe cat see the dogs\n\nthe boys run\nthe boys runs\n";
        let items = parse_items(text, 2).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].condition(1), Some("the cat sees the dogs"));
        assert_eq!(items[0].condition(2), Some("the cat see the dogs"));
        assert_eq!(items[1].id, 2);
        assert_eq!(items[1].condition(2), Some("the boys runs"));
    }

    #[test]
    fn short_block_names_the_offending_item() {
        let text = "a1\na2\n\nb1\n";
        let err = parse_items(text, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::ConditionCountMismatch {
                item: 2,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn long_block_is_rejected() {
        let text = "a1\na2\na3\n";
        let err = parse_items(text, 2).unwrap_err();
        assert!(matches!(err, Error::ConditionCountMismatch { item: 1, .. }));
    }

    #[test]
    fn condition_zero_is_absent() {
        let item = Item::new(1, vec!["x".into(), "y".into()]);
        assert_eq!(item.condition(0), None);
        assert_eq!(item.condition(3), None);
    }

    #[test]
    fn fillers_number_from_one_and_skip_blanks() {
        let fillers = parse_fillers("first\n\nsecond\n   \nthird\n");
        assert_eq!(fillers.len(), 3);
        assert_eq!(fillers[0].id, 1);
        assert_eq!(fillers[2].id, 3);
        assert_eq!(fillers[1].text, "second");
    }
}
