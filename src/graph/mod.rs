//! Binary CSR graph format support

pub mod codec;

pub use codec::{CsrGraph, FormatError};
