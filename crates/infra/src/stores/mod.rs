//! Store implementations for the enrichment capability traits.

pub mod in_memory;
