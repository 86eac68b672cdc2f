//! Article Search connector.
//!
//! [`NyTimesSource`] pulls search results page by page and turns each page
//! into a [`Batch`] of schema-projected records. Network access sits behind
//! the [`PageFetcher`] trait:
//! - [`HttpPageFetcher`]: the `reqwest` implementation used by the binary
//! - any other implementor (tests use a scripted one)
//!
//! # Paging
//!
//! `data_batches(query, n)` requests pages `0..n`. The API counts pages
//! from zero. Pages are fetched strictly one after another, and only when
//! the caller asks for the next batch, so abandoning the cursor early never
//! costs an extra request.
//!
//! # Failure
//!
//! Any failed page ends the pull. Batches already handed out stay valid;
//! nothing after the failing page is requested.

use crate::error::SourceError;
use crate::flatten::flatten_record;
use crate::models::{Batch, SearchEnvelope};
use crate::schema::Schema;
use crate::utils::truncate_for_log;
use futures::stream::{self, Stream};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use url::Url;

/// Article Search API root.
pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/search/v2/";

/// Search resource, relative to the base URL.
const SEARCH_PATH: &str = "articlesearch.json";

/// Fetch one decoded page of search results.
pub trait PageFetcher {
    /// Issue a single request for `page` of `query`.
    ///
    /// Transport or decode failures come back as errors. A decoded envelope
    /// whose status is not `"OK"` is returned as-is and judged by the caller.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchEnvelope, SourceError>;
}

/// [`PageFetcher`] that calls the Article Search API over HTTP.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpPageFetcher {
    /// Fetcher against [`DEFAULT_BASE_URL`] with no request timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_endpoint(api_key, DEFAULT_BASE_URL, None)
    }

    /// Fetcher against an arbitrary API root.
    ///
    /// The search path is appended to `base_url`. A missing trailing slash
    /// is added so that `.../v2` and `.../v2/` behave the same.
    ///
    /// # Errors
    ///
    /// - [`SourceError::MissingCredential`] if `api_key` is blank
    /// - [`SourceError::InvalidEndpoint`] if `base_url` does not parse
    /// - [`SourceError::Transport`] if the HTTP client cannot be built
    pub fn with_endpoint(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingCredential);
        }

        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Full request URL for one page, credential included.
    pub fn page_url(&self, query: &str, page: u32) -> Result<Url, SourceError> {
        let mut url = self.base_url.join(SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string())
            .append_pair("api-key", &self.api_key);
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl fmt::Debug for HttpPageFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPageFetcher")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl PageFetcher for HttpPageFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchEnvelope, SourceError> {
        // The URL carries the credential, so it is never logged and is
        // stripped from transport errors.
        let url = self.page_url(query, page)?;
        let t0 = Instant::now();
        let body = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;
        debug!(
            page,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched search page"
        );

        serde_json::from_str::<SearchEnvelope>(&body).map_err(|e| {
            debug!(
                page,
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Search response is not a valid envelope"
            );
            SourceError::from(e)
        })
    }
}

/// Batch connector for the Article Search API.
#[derive(Debug)]
pub struct NyTimesSource<F = HttpPageFetcher> {
    fetcher: F,
    schema: &'static Schema,
}

impl NyTimesSource<HttpPageFetcher> {
    /// HTTP-backed source against the public API.
    ///
    /// Fails with [`SourceError::MissingCredential`] when `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self::with_fetcher(HttpPageFetcher::new(api_key)?))
    }
}

impl<F: PageFetcher> NyTimesSource<F> {
    /// Source around any [`PageFetcher`], projecting onto the article schema.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            schema: Schema::articles(),
        }
    }

    /// Record the incremental-sync watermark.
    ///
    /// The watermark is logged and otherwise ignored: results are not
    /// filtered by it and no request is made.
    pub fn connect(&self, inc_column: Option<&str>, max_inc_value: Option<&str>) {
        debug!(?inc_column, "Incremental column");
        debug!(?max_inc_value, "Incremental last value");
    }

    /// Nothing is held between requests, so there is nothing to release.
    pub fn disconnect(&self) {
        debug!("Disconnected from article search source");
    }

    /// Field names each projected record is restricted to.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Lazily pull `batch_size` pages of `query`, one [`Batch`] per page.
    ///
    /// Nothing is fetched until [`BatchCursor::next_batch`] is awaited.
    pub fn data_batches(&self, query: impl Into<String>, batch_size: u32) -> BatchCursor<'_, F> {
        BatchCursor {
            source: self,
            query: query.into(),
            next_page: 0,
            batch_size,
            finished: false,
        }
    }

    /// Fetch, validate, flatten and project a single page.
    #[instrument(level = "info", skip(self))]
    async fn read_page(&self, query: &str, page: u32) -> Result<Batch, SourceError> {
        let envelope = self.fetcher.fetch_page(query, page).await?;

        if !envelope.is_ok() {
            let status = envelope.status_label();
            error!(page, %status, "Request failed");
            return Err(SourceError::RequestFailed { page, status });
        }

        let docs = envelope
            .into_docs()
            .ok_or(SourceError::MissingDocs { page })?;
        info!(page, count = docs.len(), "Collected articles");

        Ok(docs
            .iter()
            .map(|doc| self.schema.project(&flatten_record(doc)))
            .collect())
    }
}

/// Forward-only cursor over the batches of one pull.
///
/// Yields at most `batch_size` batches. After an error, or once every page
/// has been read, it only returns `None`.
pub struct BatchCursor<'a, F> {
    source: &'a NyTimesSource<F>,
    query: String,
    next_page: u32,
    batch_size: u32,
    finished: bool,
}

impl<'a, F> BatchCursor<'a, F>
where
    F: PageFetcher + 'a,
{
    /// Fetch and process the next page.
    pub async fn next_batch(&mut self) -> Option<Result<Batch, SourceError>> {
        if self.finished || self.next_page >= self.batch_size {
            self.finished = true;
            return None;
        }

        let page = self.next_page;
        self.next_page += 1;

        let result = self.source.read_page(&self.query, page).await;
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }

    /// Pages requested so far, including a page that failed.
    pub fn pages_requested(&self) -> u32 {
        self.next_page
    }

    /// True once every page was read or a page failed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Adapt the cursor into a [`Stream`] with the same one-page-at-a-time order.
    pub fn into_stream(self) -> impl Stream<Item = Result<Batch, SourceError>> + 'a {
        stream::unfold(self, |mut cursor| async move {
            let item = cursor.next_batch().await?;
            Some((item, cursor))
        })
    }
}

impl<F> fmt::Debug for BatchCursor<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchCursor")
            .field("query", &self.query)
            .field("next_page", &self.next_page)
            .field("batch_size", &self.batch_size)
            .field("finished", &self.finished)
            .finish()
    }
}
