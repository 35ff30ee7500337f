/// Output formatting: terminal table, plain text list, and JSON.
use serde::Serialize;
use votesort_core::Item;

use crate::bail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "table" => OutputFormat::Table,
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => bail(format!("Unknown format \"{other}\". Use \"table\", \"text\", or \"json\".")),
        }
    }
}

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    id: i64,
    title: &'a str,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    votes: usize,
}

pub fn render(format: OutputFormat, ranking: &[&Item], votes: usize) -> String {
    match format {
        OutputFormat::Table => render_table(ranking, votes),
        OutputFormat::Text => render_text(ranking),
        OutputFormat::Json => render_json(ranking, votes),
    }
}

/// Ranking as a padded terminal table.
pub fn render_table(ranking: &[&Item], votes: usize) -> String {
    let rank_width = ranking.len().to_string().len().max(2);

    let mut out = format!("{:>rank_width$} | Title\n", "#");
    out.push_str(&format!("{}-|-{}\n", "-".repeat(rank_width), "-".repeat(30)));
    for (i, item) in ranking.iter().enumerate() {
        out.push_str(&format!("{:>rank_width$} | {}\n", i + 1, item.title));
    }
    out.push_str(&format!("\n{} items ranked with {} votes\n", ranking.len(), votes));
    out
}

/// Ranking as `"{rank}. {title}"` lines, ready to paste elsewhere.
pub fn render_text(ranking: &[&Item]) -> String {
    ranking
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}\n", i + 1, item.title))
        .collect()
}

pub fn render_json(ranking: &[&Item], votes: usize) -> String {
    let items = ranking
        .iter()
        .enumerate()
        .map(|(i, item)| JsonRankedItem {
            rank: i + 1,
            id: item.id,
            title: &item.title,
        })
        .collect();

    let output = JsonOutput { items, votes };
    let mut json = serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| bail(format!("Failed to serialize ranking: {e}")));
    json.push('\n');
    json
}
