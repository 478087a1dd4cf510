//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, ApiConfig};
use crate::endpoint::ListEndpoint;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::pagination::{batch_count, Pager, MAX_IDS_PER_REQUEST};
use crate::progress::TracingProgress;
use crate::types::{JsonValue, QueryParams};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures::StreamExt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Options of the `list` command
struct ListOptions<'a> {
    resource: &'a str,
    params: QueryParams,
    since: Option<DateTime<Utc>>,
    date_field: &'a str,
    limit: Option<usize>,
    progress: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = load_config(&self.cli.config)?;

        match &self.cli.command {
            Commands::List {
                resource,
                params,
                ids,
                ids_file,
                since,
                date_field,
                limit,
                progress,
            } => {
                let mut all_ids = ids.clone();
                if let Some(path) = ids_file {
                    all_ids.extend(read_ids(path)?);
                }
                let mut query = parse_params(params)?;
                if !all_ids.is_empty() {
                    query = query.ids(all_ids);
                }
                let since = since
                    .as_deref()
                    .map(|value| parse_since(value, Utc::now()))
                    .transpose()?;

                let options = ListOptions {
                    resource,
                    params: query,
                    since,
                    date_field,
                    limit: *limit,
                    progress: *progress,
                };
                let mut stdout = std::io::stdout().lock();
                let count = self.list(&config, options, &mut stdout).await?;
                info!(resource = %resource, items = count, "listing complete");
                Ok(())
            }
            Commands::Resources => {
                for (name, resource) in &config.resources {
                    println!("{name}\t{}", resource.path);
                }
                Ok(())
            }
            Commands::Validate => {
                let client = Arc::new(HttpClient::with_config(config.client_config())?);
                for name in config.resources.keys() {
                    ListEndpoint::from_config(Arc::clone(&client), &config, name)?;
                }
                println!(
                    "{}: {} resources OK",
                    self.cli.config.display(),
                    config.resources.len()
                );
                Ok(())
            }
        }
    }

    /// Stream a resource into `out`, returning the number of items written
    async fn list(
        &self,
        config: &ApiConfig,
        options: ListOptions<'_>,
        out: &mut impl Write,
    ) -> Result<usize> {
        let client = Arc::new(HttpClient::with_config(config.client_config())?);
        let endpoint = ListEndpoint::from_config(client, config, options.resource)?;

        let mut pager = Pager::new(endpoint);
        if options.progress {
            pager = pager.with_progress(Arc::new(TracingProgress::new(options.resource)));
        }
        if let Some(count) = options.params.id_count() {
            info!(
                ids = count,
                batches = batch_count(count, MAX_IDS_PER_REQUEST),
                "listing by identifier"
            );
        }

        let mut written = 0;
        let mut items = match options.limit {
            Some(limit) => pager.stream_all(options.params).take(limit).boxed(),
            None => pager.stream_all(options.params),
        };
        while let Some(item) = items.next().await {
            let item = item?;

            // Relies on the endpoint returning newest items first
            if let Some(since) = options.since {
                if item_date(&item, options.date_field).is_some_and(|date| date < since) {
                    info!(%since, "reached items older than cutoff");
                    break;
                }
            }

            serde_json::to_writer(&mut *out, &item)?;
            writeln!(out)?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }
}

/// Parse `KEY=VALUE` parameters
fn parse_params(params: &[String]) -> Result<QueryParams> {
    params.iter().try_fold(QueryParams::new(), |query, param| {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| Error::config(format!("Invalid parameter '{param}', expected KEY=VALUE")))?;
        Ok(query.param(key.trim(), value.trim()))
    })
}

/// Read one identifier per line, skipping blanks and `#` comments
fn read_ids(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ids file '{}'", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

/// Parse a cutoff: `365d` (days before `now`), `YYYY-MM-DD`, or RFC 3339
fn parse_since(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let invalid = |message: String| Error::InvalidDate {
        value: value.to_string(),
        message,
    };

    if let Some(days) = value.strip_suffix('d') {
        let days: u32 = days.parse().map_err(|e| invalid(format!("{e}")))?;
        return Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| invalid("too far in the past".to_string()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| invalid("invalid time".to_string()))?;
        return Ok(midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| invalid(e.to_string()))
}

/// Date at a dotted path of an item, if present and RFC 3339
fn item_date(item: &JsonValue, path: &str) -> Option<DateTime<Utc>> {
    let mut current = item;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    DateTime::parse_from_rfc3339(current.as_str()?)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
