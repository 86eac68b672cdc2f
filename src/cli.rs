//! Command-line interface definitions.
//!
//! All arguments can be provided via command-line flags; the API key and
//! endpoint can also come from environment variables.

use crate::source::DEFAULT_BASE_URL;
use clap::Parser;

/// Command-line arguments for pulling article search batches.
///
/// # Examples
///
/// ```sh
/// # Ten pages of the default query, key from the environment
/// API_KEY=... nyt_article_source
///
/// # Three pages of a custom query
/// nyt_article_source --query "electric vehicles" --pages 3 --api-key YOUR_KEY
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search query
    #[arg(short, long, default_value = "Silicon Valley")]
    pub query: String,

    /// How many pages to get
    #[arg(short, long, default_value_t = 10)]
    pub pages: u32,

    /// New York Times API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Article Search API root
    #[arg(long, env = "NYT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Incremental-sync column (logged only)
    #[arg(long)]
    pub inc_column: Option<String>,

    /// Last seen value of the incremental column (logged only)
    #[arg(long)]
    pub max_inc_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["nyt_article_source", "--api-key", "k"]);

        assert_eq!(cli.query, "Silicon Valley");
        assert_eq!(cli.pages, 10);
        assert_eq!(cli.api_key, "k");
        assert_eq!(cli.timeout_secs, None);
        assert_eq!(cli.inc_column, None);
        assert_eq!(cli.max_inc_value, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "nyt_article_source",
            "-q",
            "climate",
            "-p",
            "3",
            "--api-key",
            "k",
        ]);

        assert_eq!(cli.query, "climate");
        assert_eq!(cli.pages, 3);
    }

    #[test]
    fn test_cli_endpoint_and_watermark() {
        let cli = Cli::parse_from([
            "nyt_article_source",
            "--api-key",
            "k",
            "--base-url",
            "http://localhost:9000/v2/",
            "--timeout-secs",
            "15",
            "--inc-column",
            "pub_date",
            "--max-inc-value",
            "2020-10-01",
        ]);

        assert_eq!(cli.base_url, "http://localhost:9000/v2/");
        assert_eq!(cli.timeout_secs, Some(15));
        assert_eq!(cli.inc_column.as_deref(), Some("pub_date"));
        assert_eq!(cli.max_inc_value.as_deref(), Some("2020-10-01"));
    }

    #[test]
    fn test_cli_rejects_negative_pages() {
        let res = Cli::try_parse_from(["nyt_article_source", "--api-key", "k", "--pages", "-1"]);
        assert!(res.is_err());
    }
}
