//! Class id -> category label lookup

use super::error::ClassifyError;
use crate::models::CategoryLabel;

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryMapper;

impl CategoryMapper {
    pub fn new() -> Self {
        Self
    }

    /// Map predictions row by row. The first unmapped id fails the whole batch.
    pub fn map_all(&self, ids: &[u32]) -> Result<Vec<CategoryLabel>, ClassifyError> {
        ids.iter()
            .enumerate()
            .map(|(row, &id)| {
                CategoryLabel::try_from(id)
                    .map_err(|source| ClassifyError::UnknownCategory { row, source })
            })
            .collect()
    }
}
