//! Latin-square assignment of item conditions to presentation lists.

use crate::error::{Error, Result};
use crate::stimuli::Item;

/// One entry of a presentation list: an audit identifier and the text
/// shown to the participant.
///
/// Items carry a compound `"{id}-{cond}"` identifier; fillers reuse their
/// own id. The identifier is what the order log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub text: String,
}

/// Condition shown for `item_id` in list `list_no`, under the cyclic
/// rotation.
///
/// For a fixed item the result cycles through `1..=no_lists` as `list_no`
/// does, so with `no_lists == no_conds` every condition appears exactly
/// once per item across the lists.
fn rotated_condition(item_id: u32, list_no: u32, no_lists: u32) -> u32 {
    let base = i64::from(item_id % no_lists) + 1;
    let mut cond = base - i64::from(list_no - 1);
    if cond <= 0 {
        cond += i64::from(no_lists);
    }
    cond as u32
}

/// Select, for every item, the condition that belongs in list `list_no`.
///
/// Pure over its inputs; fails without a partial result when `list_no`
/// is out of range or an item is missing the selected condition.
pub fn assign_list(items: &[Item], list_no: u32, no_lists: u32) -> Result<Vec<ListEntry>> {
    if list_no < 1 || list_no > no_lists {
        return Err(Error::ListOutOfRange { list_no, no_lists });
    }

    let mut assigned = Vec::with_capacity(items.len());
    for item in items {
        let cond = rotated_condition(item.id, list_no, no_lists);
        let text = item
            .condition(cond)
            .ok_or(Error::MissingCondition { item: item.id, cond })?;
        assigned.push(ListEntry {
            id: format!("{}-{}", item.id, cond),
            text: text.to_string(),
        });
    }
    Ok(assigned)
}
