//! Grouped position tables (by instrument name or by owner).

use crate::domain::{Decimal, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket for positions without an owner.
pub const UNCLASSIFIED: &str = "unclassified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// One row per position.
    None,
    #[default]
    Name,
    Owner,
}

impl FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "individual" => Ok(Grouping::None),
            "name" => Ok(Grouping::Name),
            "owner" => Ok(Grouping::Owner),
            other => Err(format!("must be none, name, or owner, got {}", other)),
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grouping::None => write!(f, "none"),
            Grouping::Name => write!(f, "name"),
            Grouping::Owner => write!(f, "owner"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionGroup {
    pub group_name: String,
    pub positions: Vec<Position>,
    pub count: usize,
    pub total_value: Decimal,
    pub total_profit_or_loss: Decimal,
    pub total_purchase_amount: Decimal,
    pub total_profit_or_loss_rate: Decimal,
}

impl PositionGroup {
    fn from_members(group_name: String, positions: Vec<Position>) -> Self {
        let total_value: Decimal = positions.iter().map(|p| p.value).sum();
        let total_profit_or_loss: Decimal =
            positions.iter().filter_map(|p| p.profit_or_loss).sum();
        let total_purchase_amount: Decimal =
            positions.iter().filter_map(|p| p.purchase_amount).sum();

        PositionGroup {
            group_name,
            count: positions.len(),
            positions,
            total_value,
            total_profit_or_loss,
            total_purchase_amount,
            total_profit_or_loss_rate: total_profit_or_loss.ratio_or_zero(total_purchase_amount),
        }
    }
}

/// Either the flat list or the grouped table, depending on [`Grouping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "lowercase")]
pub enum GroupedPositions {
    Individual(Vec<Position>),
    Groups(Vec<PositionGroup>),
}

impl GroupedPositions {
    pub fn is_empty(&self) -> bool {
        match self {
            GroupedPositions::Individual(rows) => rows.is_empty(),
            GroupedPositions::Groups(groups) => groups.is_empty(),
        }
    }
}

pub fn group_positions(positions: &[Position], grouping: Grouping) -> GroupedPositions {
    match grouping {
        Grouping::None => GroupedPositions::Individual(positions.to_vec()),
        Grouping::Name => GroupedPositions::Groups(group_by(positions, |p| p.name.clone())),
        Grouping::Owner => GroupedPositions::Groups(group_by(positions, |p| {
            p.owner_label().unwrap_or(UNCLASSIFIED).to_string()
        })),
    }
}

/// Groups in discovery order, then stably sorted by descending total value.
fn group_by<F>(positions: &[Position], key: F) -> Vec<PositionGroup>
where
    F: Fn(&Position) -> String,
{
    let mut buckets: Vec<(String, Vec<Position>)> = Vec::new();
    for position in positions {
        let group_key = key(position);
        match buckets.iter_mut().find(|(k, _)| *k == group_key) {
            Some((_, members)) => members.push(position.clone()),
            None => buckets.push((group_key, vec![position.clone()])),
        }
    }

    let mut groups: Vec<PositionGroup> = buckets
        .into_iter()
        .map(|(name, members)| PositionGroup::from_members(name, members))
        .collect();
    groups.sort_by(|a, b| b.total_value.cmp(&a.total_value));
    groups
}
