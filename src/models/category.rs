//! Spending category labels

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The six spending categories, keyed by the model's class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    Apparel,
    Food,
    Household,
    Salary,
    Tourism,
    Transportation,
}

/// Class id with no category in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("class id {0} has no category label (expected 0-5)")]
pub struct UnknownCategory(pub u32);

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 6] = [
        CategoryLabel::Apparel,
        CategoryLabel::Food,
        CategoryLabel::Household,
        CategoryLabel::Salary,
        CategoryLabel::Tourism,
        CategoryLabel::Transportation,
    ];

    pub fn class_id(self) -> u32 {
        match self {
            CategoryLabel::Apparel => 0,
            CategoryLabel::Food => 1,
            CategoryLabel::Household => 2,
            CategoryLabel::Salary => 3,
            CategoryLabel::Tourism => 4,
            CategoryLabel::Transportation => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryLabel::Apparel => "Apparel",
            CategoryLabel::Food => "Food",
            CategoryLabel::Household => "Household",
            CategoryLabel::Salary => "Salary",
            CategoryLabel::Tourism => "Tourism",
            CategoryLabel::Transportation => "Transportation",
        }
    }
}

impl TryFrom<u32> for CategoryLabel {
    type Error = UnknownCategory;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(CategoryLabel::Apparel),
            1 => Ok(CategoryLabel::Food),
            2 => Ok(CategoryLabel::Household),
            3 => Ok(CategoryLabel::Salary),
            4 => Ok(CategoryLabel::Tourism),
            5 => Ok(CategoryLabel::Transportation),
            other => Err(UnknownCategory(other)),
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
