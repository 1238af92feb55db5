//! Data Matrix (ECC 200) encoding pipeline
//!
//! content → ASCII codewords → size selection → padding → Reed-Solomon
//! redundancy → diagonal placement → finder-border merge

mod ecc;
mod layout;
mod size;
mod text;

pub use size::CodeSize;
pub use text::Gs1Policy;

use tracing::debug;

use crate::error::EncodeResult;
use crate::models::{Symbol, SymbolInfo};

/// Options for Data Matrix encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Force a symbol with this many rows instead of the smallest fit
    pub fixed_rows: Option<usize>,
    /// Encode GS1 element strings instead of plain text
    pub gs1: Option<Gs1Policy>,
}

/// Encode `content` into the smallest Data Matrix symbol that fits
pub fn encode(content: &str) -> EncodeResult<Symbol> {
    encode_with(content, Options::default())
}

/// Encode with explicit size and GS1 options
pub fn encode_with(content: &str, options: Options) -> EncodeResult<Symbol> {
    let mut data = match options.gs1 {
        Some(policy) => text::encode_gs1(content, policy)?,
        None => text::encode_text(content, false)?,
    };

    let size = match options.fixed_rows {
        Some(rows) => size::fixed_rows(rows, data.len())?,
        None => size::smallest_for(data.len())?,
    };
    debug!(
        rows = size.rows,
        columns = size.columns,
        data_codewords = data.len(),
        "selected code size"
    );

    text::add_padding(&mut data, size.data_codewords());
    ecc::append_ecc(&mut data, size)?;

    let mut layout = layout::CodeLayout::new(size);
    layout.set_values(&data)?;
    let modules = layout.merge();

    Ok(Symbol::new(
        modules,
        content.to_owned(),
        SymbolInfo::DataMatrix {
            rows: size.rows,
            columns: size.columns,
        },
    ))
}
