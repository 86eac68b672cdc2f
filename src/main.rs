//! # NYT Article Source
//!
//! Pulls New York Times Article Search results in page-sized batches.
//! Each search hit is flattened into dot-joined keys (`headline.main`,
//! `byline.original`, ...) and projected onto a fixed article schema.
//!
//! ## Usage
//!
//! ```sh
//! API_KEY=... nyt_article_source --query "Silicon Valley" --pages 10
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetch**: request one page of `articlesearch.json` (pages count from 0)
//! 2. **Validate**: stop the whole pull if the envelope status is not `OK`
//! 3. **Flatten**: collapse nested objects into dot-joined keys
//! 4. **Project**: keep only schema fields present in the record
//! 5. **Report**: print each batch as it arrives
//!
//! Pages are fetched one at a time, only when the previous batch has been
//! printed.

use clap::Parser;
use futures::StreamExt;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};

mod cli;
mod error;
mod flatten;
mod logging;
mod models;
mod outputs;
mod schema;
mod source;
mod utils;

use cli::Cli;
use outputs::console::render_batch;
use source::{HttpPageFetcher, NyTimesSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(query = %args.query, pages = args.pages, base_url = %args.base_url, "Parsed CLI arguments");

    let fetcher = HttpPageFetcher::with_endpoint(
        args.api_key.clone(),
        &args.base_url,
        args.timeout_secs.map(Duration::from_secs),
    )
    .inspect_err(|e| error!(error = %e, "Could not build article search client"))?;
    let source = NyTimesSource::with_fetcher(fetcher);
    debug!(fields = source.schema().len(), "Article schema loaded");

    source.connect(args.inc_column.as_deref(), args.max_inc_value.as_deref());

    let mut batches = std::pin::pin!(source.data_batches(&*args.query, args.pages).into_stream());
    let mut batch_count = 0usize;
    let mut record_count = 0usize;

    while let Some(batch) = batches.next().await {
        let batch = match batch {
            Ok(batch) => batch,
            Err(e) => {
                error!(
                    error = %e,
                    transport = e.is_transport(),
                    batches = batch_count,
                    "Batch pull aborted"
                );
                source.disconnect();
                return Err(e.into());
            }
        };
        print!("{}", render_batch(batch_count, &batch));
        batch_count += 1;
        record_count += batch.len();
    }

    source.disconnect();

    let elapsed = start_time.elapsed();
    info!(
        batches = batch_count,
        records = record_count,
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );

    Ok(())
}
