//! Scripted edits against one group, checking the top-items window after each step.

use std::{fmt, rc::Rc, str::FromStr};

use anyhow::{anyhow, bail, Context};
use data_model::{Group, Item, ItemFields, ItemRef, Record, RecordFields, TOP_ITEMS_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimOp {
    Insert { index: usize, key: String },
    Remove { index: usize },
    Move { from: usize, to: usize },
    Replace { index: usize, key: String },
    Reset,
}

impl FromStr for SimOp {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.splitn(3, ':').collect();
        let op = match parts.as_slice() {
            ["insert", index, key] => Self::Insert {
                index: parse_index(index)?,
                key: non_empty_key(key)?,
            },
            ["remove", index] => Self::Remove {
                index: parse_index(index)?,
            },
            ["move", from, to] => Self::Move {
                from: parse_index(from)?,
                to: parse_index(to)?,
            },
            ["replace", index, key] => Self::Replace {
                index: parse_index(index)?,
                key: non_empty_key(key)?,
            },
            ["reset"] => Self::Reset,
            _ => bail!(
                "unrecognized op '{raw}'; expected insert:<i>:<key>, remove:<i>, move:<from>:<to>, replace:<i>:<key> or reset"
            ),
        };
        Ok(op)
    }
}

impl fmt::Display for SimOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { index, key } => write!(f, "insert:{index}:{key}"),
            Self::Remove { index } => write!(f, "remove:{index}"),
            Self::Move { from, to } => write!(f, "move:{from}:{to}"),
            Self::Replace { index, key } => write!(f, "replace:{index}:{key}"),
            Self::Reset => f.write_str("reset"),
        }
    }
}

fn parse_index(raw: &str) -> anyhow::Result<usize> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid index"))
}

fn non_empty_key(raw: &str) -> anyhow::Result<String> {
    if raw.trim().is_empty() {
        return Err(anyhow!("item key must not be empty"));
    }
    Ok(raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub op: SimOp,
    pub item_count: usize,
    pub top_items: Vec<String>,
}

pub fn run(group: &mut Group, ops: &[SimOp]) -> anyhow::Result<Vec<StepReport>> {
    let mut reports = Vec::with_capacity(ops.len());
    for op in ops {
        apply(group, op).with_context(|| format!("failed to apply '{op}'"))?;

        let top_items = keys(group.top_items().as_slice());
        let expected_len = group.item_count().min(TOP_ITEMS_CAPACITY);
        let expected = keys(&group.items().as_slice()[..expected_len]);
        if top_items != expected {
            bail!("top items diverged after '{op}': {top_items:?} != {expected:?}");
        }

        tracing::debug!(op = %op, items = group.item_count(), "simulation step");
        reports.push(StepReport {
            op: op.clone(),
            item_count: group.item_count(),
            top_items,
        });
    }
    Ok(reports)
}

fn apply(group: &mut Group, op: &SimOp) -> data_model::Result<()> {
    match op {
        SimOp::Insert { index, key } => {
            let item = placeholder(group, key)?;
            group.insert_item(*index, item)
        }
        SimOp::Remove { index } => group.remove_item(*index).map(|_| ()),
        SimOp::Move { from, to } => group.move_item(*from, *to),
        SimOp::Replace { index, key } => {
            let item = placeholder(group, key)?;
            group.replace_item(*index, item).map(|_| ())
        }
        SimOp::Reset => {
            let current: Vec<ItemRef> = group.items().iter().cloned().collect();
            group.reset_items(current)
        }
    }
}

fn placeholder(group: &Group, key: &str) -> data_model::Result<ItemRef> {
    let fields = ItemFields::new(
        RecordFields::new(key, format!("Placeholder {key}")).subtitle("simulated"),
    );
    Ok(Rc::new(Item::new(
        fields,
        &group.unique_id(),
        group.core().image_base(),
    )?))
}

fn keys(items: &[ItemRef]) -> Vec<String> {
    items.iter().map(|item| item.unique_id()).collect()
}

#[cfg(test)]
#[path = "tests/simulate_tests.rs"]
mod tests;
