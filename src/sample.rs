//! Input measurement types.

use serde::{Deserialize, Serialize};

use crate::calendar::Timestamp;
use crate::units::Unit;

/// Capability contract for anything the chart can aggregate
pub trait Measurement {
    fn date(&self) -> Timestamp;
    fn value(&self) -> f64;
    fn unit(&self) -> Unit;
}

/// A single dated measurement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: Timestamp,
    pub value: f64,
    pub unit: Unit,
    /// Opaque id from the source system; ignored by aggregation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Sample {
    pub fn new(date: Timestamp, value: f64, unit: Unit) -> Self {
        Self {
            date,
            value,
            unit,
            external_id: None,
        }
    }

    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }
}

impl Measurement for Sample {
    fn date(&self) -> Timestamp {
        self.date
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn unit(&self) -> Unit {
        self.unit
    }
}

impl<M: Measurement + ?Sized> Measurement for std::sync::Arc<M> {
    fn date(&self) -> Timestamp {
        (**self).date()
    }

    fn value(&self) -> f64 {
        (**self).value()
    }

    fn unit(&self) -> Unit {
        (**self).unit()
    }
}
