use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constants::DEFAULT_EPOCH;

/// One fully populated worklist target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TargetRecord {
    #[validate(length(min = 1))]
    pub target: String,

    #[validate(length(min = 1))]
    pub ra: String,

    #[validate(length(min = 1))]
    pub dec: String,

    pub mag: Option<f64>,

    pub spt: String,

    #[validate(length(min = 1))]
    pub epoch: String,
}

impl TargetRecord {
    pub fn new(target: String, ra: String, dec: String) -> Self {
        Self {
            target,
            ra,
            dec,
            mag: None,
            spt: String::new(),
            epoch: DEFAULT_EPOCH.to_string(),
        }
    }

    pub fn with_mag(mut self, mag: f64) -> Self {
        self.mag = Some(mag);
        self
    }

    pub fn with_spt(mut self, spt: impl Into<String>) -> Self {
        self.spt = spt.into();
        self
    }

    pub fn with_epoch(mut self, epoch: impl Into<String>) -> Self {
        self.epoch = epoch.into();
        self
    }

    /// Magnitude to print, if it is a finite number
    pub fn usable_mag(&self) -> Option<f64> {
        self.mag.filter(|m| m.is_finite())
    }
}
