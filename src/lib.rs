//! barcode2d - 2D barcode symbol encoding in pure Rust
//!
//! Encodes text/byte payloads into the data layer of Data Matrix (ECC 200)
//! and QR (Model 2) symbols: mode encoding, size/version selection,
//! Reed-Solomon error correction over GF(256), and module placement.
//! The output is an abstract module grid; rendering it is up to the caller.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Data Matrix ECC 200 pipeline (ASCII mode, GS1, placement)
pub mod datamatrix;
/// Shared substrate (bit buffer, GF(256), Reed-Solomon)
pub mod encode;
/// Error types shared by both pipelines
pub mod error;
/// Core data structures (Symbol, BitMatrix, ECLevel)
pub mod models;
/// QR Model 2 pipeline (segments, versions, masking)
pub mod qr;

pub use error::{EncodeError, EncodeResult};
pub use models::{BitMatrix, ECLevel, Symbol, SymbolInfo};

use rayon::prelude::*;

/// Symbology selector for the top-level [`encode`] entry point.
///
/// The pipelines share their stage structure but differ in tables and
/// geometry, so a tagged variant carries the per-symbology parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// Data Matrix ECC 200, square sizes 10x10 through 144x144
    DataMatrix {
        /// Force this many rows instead of the smallest fitting size
        fixed_rows: Option<usize>,
        /// Treat content as GS1 element strings under the given policy
        gs1: Option<datamatrix::Gs1Policy>,
    },
    /// QR Model 2, versions 1 through 40
    Qr {
        /// Requested error-correction level (never boosted)
        level: ECLevel,
    },
}

/// Encode `content` into a symbol of the requested symbology
pub fn encode(content: &str, symbology: Symbology) -> EncodeResult<Symbol> {
    match symbology {
        Symbology::DataMatrix { fixed_rows, gs1 } => {
            datamatrix::encode_with(content, datamatrix::Options { fixed_rows, gs1 })
        }
        Symbology::Qr { level } => qr::encode(content, level),
    }
}

/// Encode a batch of independent jobs across the rayon thread pool.
///
/// Every encode call is side-effect-free and owns its buffers, so jobs
/// need no coordination. Results come back in input order.
pub fn encode_batch(jobs: &[(String, Symbology)]) -> Vec<EncodeResult<Symbol>> {
    jobs.par_iter()
        .map(|(content, symbology)| encode(content, *symbology))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let dm = encode(
            "1234",
            Symbology::DataMatrix {
                fixed_rows: None,
                gs1: None,
            },
        )
        .unwrap();
        assert!(matches!(dm.info(), SymbolInfo::DataMatrix { .. }));

        let qr = encode("1234", Symbology::Qr { level: ECLevel::M }).unwrap();
        assert!(matches!(qr.info(), SymbolInfo::Qr { .. }));
    }

    #[test]
    fn test_batch_preserves_order() {
        let jobs = vec![
            (
                "first".to_owned(),
                Symbology::DataMatrix {
                    fixed_rows: None,
                    gs1: None,
                },
            ),
            ("second".to_owned(), Symbology::Qr { level: ECLevel::L }),
            (
                "x".repeat(4000),
                Symbology::DataMatrix {
                    fixed_rows: None,
                    gs1: None,
                },
            ),
        ];
        let results = encode_batch(&jobs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().content(), "first");
        assert_eq!(results[1].as_ref().unwrap().content(), "second");
        assert!(matches!(
            results[2],
            Err(EncodeError::CapacityExceeded { .. })
        ));
    }
}
