pub mod json_file;

use error_stack::Report;
use futures::future::BoxFuture;

use crate::error::SourceError;
use crate::model::{DateRange, RawObservation};

/// Provider of already-reduced daily observations for a symbol.
///
/// Uses `BoxFuture` so the trait stays object-safe (`dyn DataSource`).
pub trait DataSource: Send + Sync {
    /// Fetch one observation per calendar day within `range`, oldest first.
    fn fetch_daily(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> BoxFuture<'_, Result<Vec<RawObservation>, Report<SourceError>>>;
}
