//! Column count detection across a table's shards.

use tracing::trace;

use crate::error::Result;
use crate::source::ShardSource;

/// Returns the widest comma-split row across all shards.
///
/// Content shards contribute every non-blank line; zero-byte shards
/// contribute their filename. Returns 0 when no shard yields a row.
pub fn sniff_max_cols(sources: &[ShardSource]) -> Result<usize> {
    let mut max_cols = 0;
    for source in sources {
        let mut shard_max = 0;
        for row in source.rows()? {
            shard_max = shard_max.max(row?.len());
        }
        trace!(
            shard = %source.path().display(),
            kind = source.kind(),
            columns = shard_max,
            "sniffed shard"
        );
        max_cols = max_cols.max(shard_max);
    }
    Ok(max_cols)
}
