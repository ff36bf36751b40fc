use std::fmt;

use serde::Serialize;

/// Per-request pipeline states, in the order a successful run passes through them.
///
/// `Notified` branches off after `Reconciled` and is reached by the persistence
/// worker, never by the request path itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    Validated,
    Prompted,
    Generated,
    Extracted,
    Decoded,
    Reconciled,
    Returned,
    Notified,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Validated => "validated",
            PipelineStage::Prompted => "prompted",
            PipelineStage::Generated => "generated",
            PipelineStage::Extracted => "extracted",
            PipelineStage::Decoded => "decoded",
            PipelineStage::Reconciled => "reconciled",
            PipelineStage::Returned => "returned",
            PipelineStage::Notified => "notified",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
