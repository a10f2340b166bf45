use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::StreamExt;
use tracing::{error, info};

use crate::cleanup::cleanup;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{Fetch, Fetcher};
use crate::plan::IdRange;
use crate::resource::Identifier;

#[derive(Debug)]
pub struct ItemOutcome {
    pub id: Identifier,
    pub result: Result<PathBuf>,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct BatchSummary {
    /// One outcome per attempted identifier, ascending.
    pub outcomes: Vec<ItemOutcome>,
    pub leftovers_removed: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (Identifier, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.id, e)))
    }
}

/// Runs a fetcher over a range of issues with a bounded number of workers.
pub struct Batch<F> {
    config: Config,
    fetcher: Arc<F>,
}

impl Batch<Fetcher> {
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(&config)?;
        Ok(Batch::new(config, fetcher))
    }
}

impl<F: Fetch + 'static> Batch<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        Batch {
            config,
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Attempts every identifier once, then sweeps leftover archives.
    ///
    /// Per-item failures are logged and collected; they never stop the batch.
    pub async fn run(&self, range: IdRange) -> BatchSummary {
        let started = Instant::now();
        let total = range.len();
        let workers = self.config.workers.max(1);
        info!(
            start = range.start(),
            end = range.end(),
            workers,
            "starting batch of {} archives",
            total
        );

        let mut results = futures::stream::iter(range.iter())
            .map(|id| {
                let fetcher = self.fetcher.clone();
                let handle = tokio::spawn(async move { fetcher.fetch(id).await });
                async move { (id, handle.await) }
            })
            .buffer_unordered(workers);

        let mut outcomes = Vec::with_capacity(total);
        while let Some((id, joined)) = results.next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => Err(Error::Task(e.to_string())),
            };
            let done = outcomes.len() + 1;
            match &result {
                Ok(path) => info!(%id, ?path, "[{}/{}] twic{} done", done, total, id),
                Err(e) => error!(%id, kind = e.kind(), "[{}/{}] twic{} failed: {}", done, total, id, e),
            }
            outcomes.push(ItemOutcome { id, result });
        }
        outcomes.sort_by(|o1, o2| o1.id.cmp(&o2.id));

        info!("removing leftover archives...");
        let leftovers_removed = match cleanup(&self.config.output_dir).await {
            Ok(removed) => removed,
            Err(e) => {
                error!("cleanup of {:?} failed: {}", self.config.output_dir, e);
                0
            }
        };

        let summary = BatchSummary {
            outcomes,
            leftovers_removed,
            elapsed: started.elapsed(),
        };
        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            leftovers_removed,
            "finished {} archives in {:.2?}",
            summary.total(),
            summary.elapsed
        );
        summary
    }
}

/// Validates the range, builds a networked batch from `config` and runs it.
pub async fn run(config: Config, start: u32, end: u32) -> Result<BatchSummary> {
    let range = IdRange::new(start, end)?;
    let batch = Batch::from_config(config)?;
    Ok(batch.run(range).await)
}
