//! Shared encoding substrate
//!
//! The low-level pieces both pipelines build on:
//! - Append-only bit buffer (mode encoders, QR data stream)
//! - GF(256) arithmetic and Reed-Solomon redundancy generation

pub mod bitstream;
pub mod galois;

pub use bitstream::BitStream;
pub use galois::{DATA_MATRIX_FIELD, GaloisField, QR_FIELD, ReedSolomon};
