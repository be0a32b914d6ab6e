//! Writes the good proxy set to disk

use crate::proxy::aggregator::GoodProxySet;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write every good proxy as one line, replacing whatever `path` held.
///
/// Must only be called once the dispatcher has returned. Returns the number
/// of lines written.
pub fn save_good_proxies<P: AsRef<Path>>(good: &GoodProxySet, path: P) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Error creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let entries = good.snapshot();
    for proxy in &entries {
        writeln!(writer, "{proxy}").with_context(|| format!("Error writing to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Error writing to {}", path.display()))?;

    Ok(entries.len())
}
