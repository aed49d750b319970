use anyhow::{bail, Context, Result};
use tweedex::config::ConnectionSettings;
use tweedex::elastic::ElasticClient;
use tweedex::search::{catalog, find, Searcher};

pub fn run(settings: ConnectionSettings, query_name: &str, max_results: usize) -> Result<()> {
    let Some(query) = find(query_name) else {
        let names: Vec<&str> = catalog().iter().map(|q| q.name).collect();
        bail!(
            "unknown query '{}'; available: {}",
            query_name,
            names.join(", ")
        );
    };

    let client = ElasticClient::create(&settings).context("connection settings rejected")?;
    let searcher = Searcher::new(client);
    let results = searcher
        .search(&query, max_results)
        .with_context(|| format!("query '{}' failed", query.name))?;

    for record in &results {
        let date = record
            .created_at()
            .map(|t| t.format("%d %b %Y %H:%M").to_string())
            .or_else(|| record.created_at_raw().map(str::to_string))
            .unwrap_or_default();
        let text = record.text().unwrap_or("");
        // Every URL entity survives the import; one is enough for a row.
        let url = record
            .urls()
            .first()
            .and_then(|u| u.expanded_url.clone())
            .unwrap_or_default();

        println!("{:<17} {} {}", date, text, url);
    }

    println!("\n{} results ({})", results.len(), query.description);
    Ok(())
}

pub fn list_queries() -> Result<()> {
    println!("Available queries:");
    for query in catalog() {
        println!("  {:<10} {}", query.name, query.description);
    }
    Ok(())
}
