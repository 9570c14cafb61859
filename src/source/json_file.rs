use std::io::ErrorKind;
use std::path::PathBuf;

use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use tracing::debug;

use crate::error::SourceError;
use crate::model::{DateRange, RawObservation};
use crate::source::DataSource;

/// Reads `<dir>/<symbol>.json`, a JSON array of daily observations.
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.json"))
    }

    async fn load(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<RawObservation>, Report<SourceError>> {
        let path = self.path_for(symbol);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| {
                let symbol = symbol.to_owned();
                let context = if e.kind() == ErrorKind::NotFound {
                    SourceError::NotFound { symbol }
                } else {
                    SourceError::Read { symbol }
                };
                Report::new(e).change_context(context)
            })
            .attach_with(|| format!("path: {}", path.display()))?;

        let observations = parse_observations(&content, range)
            .change_context(SourceError::Parse {
                symbol: symbol.to_owned(),
            })
            .attach_with(|| format!("path: {}", path.display()))?;

        debug!(
            symbol,
            path = %path.display(),
            range = %range,
            count = observations.len(),
            "observations loaded"
        );

        Ok(observations)
    }
}

impl DataSource for JsonFileSource {
    fn fetch_daily(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> BoxFuture<'_, Result<Vec<RawObservation>, Report<SourceError>>> {
        let symbol = symbol.to_owned();
        Box::pin(async move { self.load(&symbol, range).await })
    }
}

/// Decode observations, keep those inside `range` and order them by date.
fn parse_observations(
    content: &str,
    range: DateRange,
) -> Result<Vec<RawObservation>, serde_json::Error> {
    let mut observations: Vec<RawObservation> = serde_json::from_str(content)?;
    observations.retain(|o| range.contains(o.date));
    observations.sort_by_key(|o| o.date);
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SAMPLE: &str = r#"[
        {"date": "2024-01-03", "close": 102.0, "high": 103.0, "low": 101.0},
        {"date": "2024-01-01", "close": 100.0, "high": 101.0, "low": 99.0, "volume": 1200},
        {"date": "2024-01-02", "close": 101.0, "high": 102.0, "low": 100.0}
    ]"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "product-analysis-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parse_sorts_and_filters() {
        let range = DateRange {
            from: date(2024, 1, 2),
            to: date(2024, 1, 31),
        };
        let observations = parse_observations(SAMPLE, range).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].date, date(2024, 1, 2));
        assert_eq!(observations[1].date, date(2024, 1, 3));
        assert_eq!(observations[1].close, 102.0);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let range = DateRange {
            from: date(2024, 1, 1),
            to: date(2024, 1, 31),
        };
        assert!(parse_observations(r#"[{"date": "2024-01-01"}]"#, range).is_err());
    }

    #[tokio::test]
    async fn fetch_reads_symbol_file() {
        let dir = scratch_dir("fetch");
        std::fs::write(dir.join("ES.json"), SAMPLE).unwrap();

        let source = JsonFileSource::new(&dir);
        let range = DateRange {
            from: date(2024, 1, 1),
            to: date(2024, 1, 31),
        };
        let observations = source.fetch_daily("ES", range).await.unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].date, date(2024, 1, 1));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn fetch_missing_symbol_is_not_found() {
        let dir = scratch_dir("missing");
        let source = JsonFileSource::new(&dir);
        let range = DateRange {
            from: date(2024, 1, 1),
            to: date(2024, 1, 31),
        };
        let err = source.fetch_daily("NOPE", range).await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            SourceError::NotFound { symbol } if symbol == "NOPE"
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
