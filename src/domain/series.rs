// Multi-series domain model
use super::sample::Sample;

const KEY_HASH_PREFIX: &str = "multiLine";

/// Categorical palette used when a series has no explicit color.
pub const SERIES_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: String,
    pub key_hash: Option<String>,
    pub color: Option<String>,
    pub values: Vec<Sample>,
}

impl Series {
    pub fn new(key: String, color: Option<String>, values: Vec<Sample>) -> Self {
        Self {
            key,
            key_hash: None,
            color,
            values,
        }
    }
}

/// 32-bit string hash over UTF-16 code units (`h = h * 31 + c`, wrapping).
pub fn hash_string(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Identity token for a series key, usable as an element id.
pub fn key_hash(key: &str) -> String {
    format!("{}{}", KEY_HASH_PREFIX, hash_string(key))
}

pub fn palette_color(key: &str) -> &'static str {
    let idx = hash_string(key).unsigned_abs() as usize % SERIES_PALETTE.len();
    SERIES_PALETTE[idx]
}
