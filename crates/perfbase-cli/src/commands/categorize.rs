use crate::OutputFormat;
use anyhow::Result;
use perfbase_core::categorize;

#[derive(Debug, serde::Serialize)]
pub struct Categorized {
    pub url: String,
    pub category: String,
}

pub fn categorize_all(urls: &[String]) -> Vec<Categorized> {
    urls.iter()
        .map(|url| Categorized {
            url: url.clone(),
            category: categorize(url),
        })
        .collect()
}

pub fn execute(urls: &[String], format: OutputFormat) -> Result<()> {
    let results = categorize_all(urls);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Table => {
            println!("Category,URL");
            for r in &results {
                println!("{},{}", r.category, r.url);
            }
        }
        OutputFormat::Pretty => {
            let width = results.iter().map(|r| r.category.len()).max().unwrap_or(0);
            for r in &results {
                let padded = format!("{:<width$}", r.category, width = width);
                println!("  {}  {}", console::style(padded).bold(), r.url);
            }
        }
    }

    Ok(())
}
