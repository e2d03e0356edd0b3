use crate::{
    error::Result,
    fetch::{BatchFetcher, RepositoryResult},
    query::{self, alias},
    report::{ReportRow, ReportWriter},
    repos::RepositoryRef,
};
use log::{debug, info};
use std::io::Write;

/// Resolve `repos` batch by batch and write one row per repository, in
/// input order. Returns the number of rows written.
pub async fn run<F, W>(
    repos: &[RepositoryRef],
    batch_size: usize,
    fetcher: &F,
    writer: &mut ReportWriter<W>,
) -> Result<usize>
where
    F: BatchFetcher + ?Sized,
    W: Write,
{
    let mut rows = 0;
    for batch in query::batches(repos, batch_size)? {
        info!(
            "Fetching batch {} ({} repositories)",
            batch.index,
            batch.repos.len()
        );
        debug!("Query: {}", batch.payload.query);

        let response = fetcher.fetch(batch.index, &batch.payload).await;
        for (i, repo) in batch.repos.iter().enumerate() {
            let result = response.resolve(&alias(i));
            if let RepositoryResult::Missing { status } = result {
                debug!("{repo}: not resolved (status {status})");
            }
            let row = ReportRow::new(repo, result);
            writer.write_row(&row)?;
            rows += 1;
        }
        writer.flush()?;
    }
    Ok(rows)
}
