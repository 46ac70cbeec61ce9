//! Pipeline stage entry points, one module per subcommand

pub mod bench;
pub mod convert;
pub mod ingest;
pub mod plot;
