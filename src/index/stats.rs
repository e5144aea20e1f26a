use crate::index::filter::FilterIndex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::io::{self, Write};

/// Bucket occupancy statistics for a built index
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexStats {
    pub reference_len: usize,
    pub window_len: usize,
    pub entries: usize,
    pub buckets: usize,
    pub occupied_buckets: usize,
    pub max_chain_len: usize,
    pub mean_chain_len: f64,
    pub memory_bytes: usize,
    /// `(chain length, bucket count)` sorted by chain length, empty buckets excluded
    pub chain_histogram: Vec<(usize, usize)>,
}

impl IndexStats {
    pub fn collect(index: &FilterIndex) -> Self {
        let mut histogram: FxHashMap<usize, usize> = FxHashMap::default();
        let mut occupied = 0;
        let mut max_chain = 0;

        for bucket in index.buckets() {
            let len = bucket.len();
            if len == 0 {
                continue;
            }
            occupied += 1;
            max_chain = max_chain.max(len);
            *histogram.entry(len).or_insert(0) += 1;
        }

        let mut chain_histogram: Vec<(usize, usize)> = histogram.into_iter().collect();
        chain_histogram.sort_unstable();

        let mean_chain_len = if occupied == 0 {
            0.0
        } else {
            index.entry_count() as f64 / occupied as f64
        };

        Self {
            reference_len: index.reference_len(),
            window_len: index.window_len(),
            entries: index.entry_count(),
            buckets: index.bucket_count(),
            occupied_buckets: occupied,
            max_chain_len: max_chain,
            mean_chain_len,
            memory_bytes: index.memory_usage(),
            chain_histogram,
        }
    }

    /// Fraction of buckets holding at least one entry
    pub fn load_factor(&self) -> f64 {
        if self.buckets == 0 {
            0.0
        } else {
            self.occupied_buckets as f64 / self.buckets as f64
        }
    }

    /// Print a human readable report
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Index Statistics")?;
        writeln!(out, "================")?;
        writeln!(out)?;
        writeln!(out, "Reference size:   {}", format_size(self.reference_len as u64))?;
        writeln!(out, "Window length:    {}", self.window_len)?;
        writeln!(out, "Entries:          {}", self.entries)?;
        writeln!(out, "Buckets:          {}", self.buckets)?;
        writeln!(
            out,
            "Occupied:         {} ({:.1}%)",
            self.occupied_buckets,
            self.load_factor() * 100.0
        )?;
        writeln!(out, "Max chain:        {}", self.max_chain_len)?;
        writeln!(out, "Mean chain:       {:.2}", self.mean_chain_len)?;
        writeln!(out, "Memory (approx):  {}", format_size(self.memory_bytes as u64))?;

        if !self.chain_histogram.is_empty() {
            writeln!(out)?;
            writeln!(out, "Chain lengths:")?;
            for (len, count) in self.chain_histogram.iter().take(15) {
                writeln!(out, "  {:6} {}", len, count)?;
            }
            if self.chain_histogram.len() > 15 {
                writeln!(out, "  ... and {} more", self.chain_histogram.len() - 15)?;
            }
        }
        Ok(())
    }
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::FilterIndexBuilder;
    use crate::index::types::IndexConfig;

    #[test]
    fn test_stats_totals() {
        let index = FilterIndexBuilder::new(IndexConfig::new(8).with_buckets(5))
            .build(b"abcdefghijklmnop")
            .unwrap();
        let stats = IndexStats::collect(&index);

        assert_eq!(stats.entries, 9 * 6);
        assert_eq!(stats.buckets, 5);
        assert!(stats.occupied_buckets <= 5);
        let from_histogram: usize = stats.chain_histogram.iter().map(|(l, c)| l * c).sum();
        assert_eq!(from_histogram, stats.entries);
        assert!(stats.max_chain_len >= stats.mean_chain_len as usize);
    }

    #[test]
    fn test_stats_empty_index() {
        let index = FilterIndexBuilder::new(IndexConfig::new(8))
            .build(b"abc")
            .unwrap();
        let stats = IndexStats::collect(&index);
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.occupied_buckets, 0);
        assert_eq!(stats.mean_chain_len, 0.0);
        assert!(stats.chain_histogram.is_empty());
    }

    #[test]
    fn test_report_renders() {
        let index = FilterIndexBuilder::new(IndexConfig::new(4))
            .build(b"aaaaaaaa")
            .unwrap();
        let mut out = Vec::new();
        IndexStats::collect(&index).write_report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Entries:          30"));
        assert!(text.contains("Chain lengths:"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
