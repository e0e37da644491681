//! Record store: the bundled country dataset, parsed once at startup.
//!
//! Only the primary metric (`both`) is load-bearing; a row whose metric does
//! not parse is dropped. Aspect ratio and the order hints are layout
//! cosmetics and fall back to 0.

use std::str::FromStr;

use csv::StringRecord;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::LoadError;

const EMBEDDED_CSV: &[u8] = include_bytes!("../data/countries.csv");

// Column positions. 2 and 3 are present in the file but unused.
const COL_COUNTRY: usize = 0;
const COL_BOTH: usize = 1;
const COL_DISH: usize = 4;
const COL_DISH_WIKI: usize = 5;
const COL_IMAGE_LINK: usize = 6;
const COL_ASPECT_RATIO: usize = 7;
const COL_ORDER_2: usize = 8;
const COL_ORDER_3: usize = 9;
const COL_ORDER_4: usize = 10;
const MIN_COLUMNS: usize = COL_ORDER_4 + 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub country: String,
    pub both: f64,
    pub national_dish: String,
    pub dish_wiki: String,
    pub image_link: String,
    pub aspect_ratio: f64,
    pub order_2_cols: i64,
    pub order_3_cols: i64,
    pub order_4_cols: i64,
}

impl Record {
    /// Only records with an image become cards.
    pub fn is_displayable(&self) -> bool {
        !self.image_link.is_empty()
    }

    /// Precomputed order for a 2, 3 or 4 column grid.
    pub fn order_hint(&self, columns: usize) -> Option<i64> {
        match columns {
            2 => Some(self.order_2_cols),
            3 => Some(self.order_3_cols),
            4 => Some(self.order_4_cols),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Parse the dataset compiled into the binary.
    pub fn embedded() -> Result<Self, LoadError> {
        Self::load(EMBEDDED_CSV)
    }

    /// Parse raw CSV bytes. The first line is a header and is skipped.
    pub fn load(raw: &[u8]) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(raw);

        let width = reader.headers()?.len();
        if width != 0 && width < MIN_COLUMNS {
            return Err(LoadError::MissingColumns {
                found: width,
                expected: MIN_COLUMNS,
            });
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            match parse_row(&row, line) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        info!(records = records.len(), skipped, "dataset loaded");
        Ok(Self { records })
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn displayable_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_displayable()).count()
    }

    /// Record whose metric is nearest to `target`. Ties go to the earlier record.
    pub fn closest(&self, target: f64) -> Option<&Record> {
        if !target.is_finite() {
            return None;
        }
        let mut best: Option<(&Record, f64)> = None;
        for record in self.records.iter().filter(|r| r.both.is_finite()) {
            let distance = (record.both - target).abs();
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((record, distance)),
            }
        }
        best.map(|(r, _)| r)
    }
}

fn parse_row(row: &StringRecord, line: u64) -> Option<Record> {
    let field = |col: usize| row.get(col).unwrap_or_default();

    let both = match field(COL_BOTH).parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn!(line, value = field(COL_BOTH), "unparseable metric, row skipped");
            return None;
        }
    };

    Some(Record {
        country: field(COL_COUNTRY).to_string(),
        both,
        national_dish: field(COL_DISH).to_string(),
        dish_wiki: field(COL_DISH_WIKI).to_string(),
        image_link: field(COL_IMAGE_LINK).to_string(),
        aspect_ratio: parse_or_zero(field(COL_ASPECT_RATIO), "aspect_ratio", line),
        order_2_cols: parse_or_zero(field(COL_ORDER_2), "order_2_cols", line),
        order_3_cols: parse_or_zero(field(COL_ORDER_3), "order_3_cols", line),
        order_4_cols: parse_or_zero(field(COL_ORDER_4), "order_4_cols", line),
    })
}

fn parse_or_zero<T>(raw: &str, name: &'static str, line: u64) -> T
where
    T: FromStr + Default,
{
    raw.parse().unwrap_or_else(|_| {
        debug!(line, field = name, value = raw, "unparseable, defaulting to 0");
        T::default()
    })
}
