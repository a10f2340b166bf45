use crate::error::{Error, Result};
use crate::resource::Identifier;

/// Half-open range `[start, end)` of issues making up one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    start: u32,
    end: u32,
}

impl IdRange {
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(IdRange { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ascending identifiers; every call starts over from `start`.
    pub fn iter(&self) -> impl Iterator<Item = Identifier> + Send + use<> {
        (self.start..self.end).map(Identifier)
    }
}
