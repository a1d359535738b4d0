use crate::classify::{style_tags_of, sweetness_of};
use crate::record::{WineCatalog, WineRecord};
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header indices resolved once per file. Required columns must exist;
/// province/winery are display-only extras and may be absent.
struct Columns {
    title: usize,
    description: usize,
    price: usize,
    points: usize,
    country: usize,
    variety: usize,
    province: Option<usize>,
    winery: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::ByteRecord) -> Result<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).with_context(|| format!("dataset is missing required column '{name}'"))
        };
        Ok(Columns {
            title: require("title")?,
            description: require("description")?,
            price: require("price")?,
            points: require("points")?,
            country: require("country")?,
            variety: require("variety")?,
            province: find("province"),
            winery: find("winery"),
        })
    }
}

/// Build a catalog from a CSV source with a header row. Rows without a title
/// are skipped; reading stops once `limit` records are collected. Invalid
/// UTF-8 bytes are replaced, never rejected.
pub fn load_catalog<R: Read>(reader: R, limit: usize) -> Result<WineCatalog> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.byte_headers()?.clone();
    if headers.is_empty() {
        bail!("dataset has no header row");
    }
    let cols = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rdr.byte_records() {
        let row = row?;
        let title = lossy(&row, cols.title);
        if title.trim().is_empty() {
            skipped += 1;
            continue;
        }
        let description = lossy(&row, cols.description);
        records.push(WineRecord {
            sweetness: sweetness_of(&description),
            style_tags: style_tags_of(&description),
            title,
            country: lossy_opt(&row, Some(cols.country)),
            variety: lossy_opt(&row, Some(cols.variety)),
            province: lossy_opt(&row, cols.province),
            winery: lossy_opt(&row, cols.winery),
            price: lossy(&row, cols.price).trim().to_string(),
            points: lossy(&row, cols.points).trim().to_string(),
            description,
        });
        if records.len() >= limit {
            break;
        }
    }
    tracing::info!(loaded = records.len(), skipped, "catalog loaded");
    Ok(WineCatalog::new(records))
}

pub fn load_catalog_path<P: AsRef<Path>>(path: P, limit: usize) -> Result<WineCatalog> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("opening dataset {}", path.as_ref().display()))?;
    load_catalog(file, limit)
}

fn lossy(row: &csv::ByteRecord, idx: usize) -> String {
    row.get(idx)
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_default()
}

/// Like `lossy` but empty or absent cells become None.
fn lossy_opt(row: &csv::ByteRecord, idx: Option<usize>) -> Option<String> {
    let s = lossy(row, idx?);
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}
