//! Codeword placement and finder-pattern merge for ECC 200 symbols.

use super::size::CodeSize;
use crate::error::{EncodeError, EncodeResult};
use crate::models::BitMatrix;

/// Places codeword bits into the interior matrix along the diagonal sweep,
/// then merges the data regions with the finder and timing borders.
pub(crate) struct CodeLayout<'a> {
    matrix: BitMatrix,
    occupied: BitMatrix,
    size: &'a CodeSize,
}

impl<'a> CodeLayout<'a> {
    pub(crate) fn new(size: &'a CodeSize) -> Self {
        Self {
            matrix: BitMatrix::new(size.matrix_columns(), size.matrix_rows()),
            occupied: BitMatrix::new(size.matrix_columns(), size.matrix_rows()),
            size,
        }
    }

    fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.occupied.get(col as usize, row as usize)
    }

    /// Write bit `bit_num` (0 = most significant) of `value` at (row, col),
    /// wrapping negative coordinates to the opposite edge per the placement
    /// rules of the specification.
    fn set(&mut self, mut row: i32, mut col: i32, value: u8, bit_num: u8) {
        let rows = self.size.matrix_rows() as i32;
        let cols = self.size.matrix_columns() as i32;
        if row < 0 {
            row += rows;
            col += 4 - ((rows + 4) % 8);
        }
        if col < 0 {
            col += cols;
            row += 4 - ((cols + 4) % 8);
        }
        debug_assert!(
            !self.is_occupied(row, col),
            "module ({row},{col}) placed twice"
        );
        let dark = (value >> (7 - bit_num)) & 1 == 1;
        self.occupied.set(col as usize, row as usize, true);
        self.matrix.set(col as usize, row as usize, dark);
    }

    /// L-shaped group of eight modules anchored at (row, col)
    fn utah(&mut self, row: i32, col: i32, value: u8) {
        self.set(row - 2, col - 2, value, 0);
        self.set(row - 2, col - 1, value, 1);
        self.set(row - 1, col - 2, value, 2);
        self.set(row - 1, col - 1, value, 3);
        self.set(row - 1, col, value, 4);
        self.set(row, col - 2, value, 5);
        self.set(row, col - 1, value, 6);
        self.set(row, col, value, 7);
    }

    fn corner1(&mut self, value: u8) {
        let rows = self.size.matrix_rows() as i32;
        let cols = self.size.matrix_columns() as i32;
        self.set(rows - 1, 0, value, 0);
        self.set(rows - 1, 1, value, 1);
        self.set(rows - 1, 2, value, 2);
        self.set(0, cols - 2, value, 3);
        self.set(0, cols - 1, value, 4);
        self.set(1, cols - 1, value, 5);
        self.set(2, cols - 1, value, 6);
        self.set(3, cols - 1, value, 7);
    }

    fn corner2(&mut self, value: u8) {
        let rows = self.size.matrix_rows() as i32;
        let cols = self.size.matrix_columns() as i32;
        self.set(rows - 3, 0, value, 0);
        self.set(rows - 2, 0, value, 1);
        self.set(rows - 1, 0, value, 2);
        self.set(0, cols - 4, value, 3);
        self.set(0, cols - 3, value, 4);
        self.set(0, cols - 2, value, 5);
        self.set(0, cols - 1, value, 6);
        self.set(1, cols - 1, value, 7);
    }

    fn corner3(&mut self, value: u8) {
        let rows = self.size.matrix_rows() as i32;
        let cols = self.size.matrix_columns() as i32;
        self.set(rows - 3, 0, value, 0);
        self.set(rows - 2, 0, value, 1);
        self.set(rows - 1, 0, value, 2);
        self.set(0, cols - 2, value, 3);
        self.set(0, cols - 1, value, 4);
        self.set(1, cols - 1, value, 5);
        self.set(2, cols - 1, value, 6);
        self.set(3, cols - 1, value, 7);
    }

    fn corner4(&mut self, value: u8) {
        let rows = self.size.matrix_rows() as i32;
        let cols = self.size.matrix_columns() as i32;
        self.set(rows - 1, 0, value, 0);
        self.set(rows - 1, cols - 1, value, 1);
        self.set(0, cols - 3, value, 2);
        self.set(0, cols - 2, value, 3);
        self.set(0, cols - 1, value, 4);
        self.set(1, cols - 3, value, 5);
        self.set(1, cols - 2, value, 6);
        self.set(1, cols - 1, value, 7);
    }

    /// Sweep the interior diagonally and place every codeword.
    pub(crate) fn set_values(&mut self, data: &[u8]) -> EncodeResult<()> {
        let rows = self.size.matrix_rows() as i32;
        let cols = self.size.matrix_columns() as i32;
        let mut idx = 0usize;
        let mut take = || -> EncodeResult<u8> {
            let value = data.get(idx).copied().ok_or_else(|| {
                EncodeError::Internal("codeword stream shorter than the placement sweep".into())
            })?;
            idx += 1;
            Ok(value)
        };

        let mut row = 4i32;
        let mut col = 0i32;
        loop {
            if row == rows && col == 0 {
                self.corner1(take()?);
            }
            if row == rows - 2 && col == 0 && cols % 4 != 0 {
                self.corner2(take()?);
            }
            if row == rows - 2 && col == 0 && cols % 8 == 4 {
                self.corner3(take()?);
            }
            if row == rows + 4 && col == 2 && cols % 8 == 0 {
                self.corner4(take()?);
            }

            // Upwards-right diagonal
            loop {
                if row < rows && col >= 0 && !self.is_occupied(row, col) {
                    self.utah(row, col, take()?);
                }
                row -= 2;
                col += 2;
                if row < 0 || col >= cols {
                    break;
                }
            }
            row += 1;
            col += 3;

            // Downwards-left diagonal
            loop {
                if row >= 0 && col < cols && !self.is_occupied(row, col) {
                    self.utah(row, col, take()?);
                }
                row += 2;
                col -= 2;
                if row >= rows || col < 0 {
                    break;
                }
            }
            row += 3;
            col += 1;

            if row >= rows && col >= cols {
                break;
            }
        }

        // Interiors whose bit count is not a codeword multiple leave a 2x2
        // hole at the bottom-right corner, filled with a fixed pattern.
        let (last_col, last_row) = (self.size.matrix_columns() - 1, self.size.matrix_rows() - 1);
        if !self.occupied.get(last_col, last_row) {
            self.matrix.set(last_col, last_row, true);
            self.matrix.set(last_col - 1, last_row - 1, true);
        }

        if idx != data.len() {
            return Err(EncodeError::Internal(format!(
                "placement consumed {idx} of {} codewords",
                data.len()
            )));
        }
        Ok(())
    }

    /// Merge the data regions with the solid and dotted finder borders into
    /// the final module grid.
    pub(crate) fn merge(self) -> BitMatrix {
        let size = self.size;
        let region_rows = size.region_rows();
        let region_cols = size.region_columns();
        let mut result = BitMatrix::new(size.columns, size.rows);

        // Dotted top border of every region band
        for r in (0..size.rows).step_by(region_rows + 2) {
            for c in (0..size.columns).step_by(2) {
                result.set(c, r, true);
            }
        }
        // Solid bottom border of every region band
        for r in (region_rows + 1..size.rows).step_by(region_rows + 2) {
            for c in 0..size.columns {
                result.set(c, r, true);
            }
        }
        // Dotted right border of every region column
        for c in (region_cols + 1..size.columns).step_by(region_cols + 2) {
            for r in (1..size.rows).step_by(2) {
                result.set(c, r, true);
            }
        }
        // Solid left border of every region column
        for c in (0..size.columns).step_by(region_cols + 2) {
            for r in 0..size.rows {
                result.set(c, r, true);
            }
        }

        // Copy each region's interior, offset past its border
        for h in 0..size.region_count_horizontal {
            for v in 0..size.region_count_vertical {
                for x in 0..region_cols {
                    let col_matrix = region_cols * h + x;
                    let col_result = (2 + region_cols) * h + x + 1;
                    for y in 0..region_rows {
                        let row_matrix = region_rows * v + y;
                        let row_result = (2 + region_rows) * v + y + 1;
                        result.set(col_result, row_result, self.matrix.get(col_matrix, row_matrix));
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamatrix::size::CODE_SIZES;

    #[test]
    fn test_sweep_consumes_every_codeword() {
        for size in &CODE_SIZES {
            let data = vec![0xA5u8; size.total_codewords()];
            let mut layout = CodeLayout::new(size);
            layout
                .set_values(&data)
                .unwrap_or_else(|e| panic!("{}x{}: {e}", size.rows, size.columns));
        }
    }

    #[test]
    fn test_short_stream_is_internal_fault() {
        let size = &CODE_SIZES[0];
        let data = vec![0u8; size.total_codewords() - 1];
        let mut layout = CodeLayout::new(size);
        assert!(matches!(
            layout.set_values(&data),
            Err(EncodeError::Internal(_))
        ));
    }

    #[test]
    fn test_merge_borders_single_region() {
        let size = &CODE_SIZES[0]; // 10x10
        let mut layout = CodeLayout::new(size);
        layout.set_values(&vec![0u8; size.total_codewords()]).unwrap();
        let grid = layout.merge();

        for r in 0..10 {
            assert!(grid.get(0, r), "solid left column at row {r}");
            assert!(grid.get(r, 9), "solid bottom row at column {r}");
        }
        for c in 0..10 {
            assert_eq!(grid.get(c, 0), c % 2 == 0, "dotted top row at column {c}");
        }
        for r in 0..10 {
            assert_eq!(grid.get(9, r), r % 2 == 1, "dotted right column at row {r}");
        }
    }

    #[test]
    fn test_merge_borders_multi_region() {
        let size = &CODE_SIZES[9]; // 32x32, 2x2 regions of 14x14
        let mut layout = CodeLayout::new(size);
        layout.set_values(&vec![0u8; size.total_codewords()]).unwrap();
        let grid = layout.merge();

        // Interior band borders: solid row 15, dotted row 16
        for c in 0..32 {
            assert!(grid.get(c, 15));
            assert_eq!(grid.get(c, 16), c % 2 == 0);
        }
        // Interior column borders: dotted column 15, solid column 16
        for r in 0..32 {
            assert!(grid.get(16, r));
            assert_eq!(grid.get(15, r), r % 2 == 1);
        }
    }

    #[test]
    fn test_remainder_corner_pattern() {
        // 16x16 interior is 14x14 = 196 bits for 24 codewords (192 bits);
        // the spare 2x2 corner carries the fixed pattern.
        let size = &CODE_SIZES[3];
        let mut layout = CodeLayout::new(size);
        layout.set_values(&vec![0u8; size.total_codewords()]).unwrap();
        assert!(layout.matrix.get(13, 13));
        assert!(layout.matrix.get(12, 12));
        assert!(!layout.matrix.get(13, 12));
        assert!(!layout.matrix.get(12, 13));
    }
}
