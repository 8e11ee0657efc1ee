use crate::RequestId;

/// Network work requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadFields {
        request: RequestId,
    },
    LoadValues {
        request: RequestId,
        field: String,
    },
    SubmitScrape {
        urls: Vec<String>,
    },
    /// Criteria are `field == v` for each value, in selection order.
    FetchResults {
        request: RequestId,
        field: String,
        values: Vec<String>,
    },
}
