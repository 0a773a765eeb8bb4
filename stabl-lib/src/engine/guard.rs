use std::cell::Cell;

use crate::error::{CdpError, CdpResult};

/// Held for the whole duration of a mutating entry point, released on drop.
pub struct ReentrancyGuard<'a> {
    entered: &'a Cell<bool>,
}

impl<'a> ReentrancyGuard<'a> {
    #[track_caller]
    pub fn enter(entered: &'a Cell<bool>) -> CdpResult<Self> {
        if entered.replace(true) {
            return Err(CdpError::Reentrancy.into());
        }
        Ok(Self { entered })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.entered.set(false);
    }
}
