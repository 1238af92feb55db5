//! GF(256) arithmetic and Reed-Solomon redundancy generation.
//!
//! The two symbologies use different field reduction polynomials and
//! different generator-root conventions, so both are parameters here:
//! QR works in the field of x^8 + x^4 + x^3 + x^2 + 1 with generator roots
//! starting at alpha^0, Data Matrix in x^8 + x^5 + x^3 + x^2 + 1 with roots
//! starting at alpha^1.

use std::sync::LazyLock;

/// GF(256) log/antilog tables for one primitive polynomial
pub struct GaloisField {
    exp: [u8; 256],
    log: [u8; 256],
}

/// Field used by QR symbols (primitive polynomial 0x11D)
pub static QR_FIELD: LazyLock<GaloisField> = LazyLock::new(|| GaloisField::new(0x11D));

/// Field used by Data Matrix symbols (primitive polynomial 0x12D)
pub static DATA_MATRIX_FIELD: LazyLock<GaloisField> = LazyLock::new(|| GaloisField::new(0x12D));

impl GaloisField {
    fn new(primitive: u16) -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= primitive;
            }
        }
        exp[255] = exp[0];
        Self { exp, log }
    }

    /// Field product of `a` and `b`
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let idx = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[idx % 255]
    }

    /// alpha^n for the field generator alpha = 2
    pub fn exp(&self, n: usize) -> u8 {
        self.exp[n % 255]
    }
}

/// Reed-Solomon redundancy generator over a specific field.
pub struct ReedSolomon {
    field: &'static GaloisField,
    root_base: usize,
}

impl ReedSolomon {
    /// `root_base` selects the first generator root alpha^root_base
    pub fn new(field: &'static GaloisField, root_base: usize) -> Self {
        Self { field, root_base }
    }

    /// Generator polynomial coefficients below the monic leading term,
    /// highest order first.
    fn generator(&self, degree: usize) -> Vec<u8> {
        debug_assert!((1..=255).contains(&degree));
        let mut coeffs = vec![0u8; degree - 1];
        coeffs.push(1);
        let mut root = self.field.exp(self.root_base);
        for _ in 0..degree {
            // Multiply the running product by (x - root)
            for j in 0..degree {
                coeffs[j] = self.field.mul(coeffs[j], root);
                if j + 1 < degree {
                    coeffs[j] ^= coeffs[j + 1];
                }
            }
            root = self.field.mul(root, 2);
        }
        coeffs
    }

    /// Compute `degree` redundancy codewords for `data` (the remainder of
    /// data * x^degree divided by the generator polynomial).
    pub fn remainder(&self, data: &[u8], degree: usize) -> Vec<u8> {
        let divisor = self.generator(degree);
        let mut result = vec![0u8; degree];
        for &b in data {
            let factor = b ^ result[0];
            result.rotate_left(1);
            result[degree - 1] = 0;
            for (x, &y) in result.iter_mut().zip(divisor.iter()) {
                *x ^= self.field.mul(y, factor);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode-side check: evaluate the full codeword polynomial at every
    /// generator root. All syndromes are zero for a valid codeword.
    fn syndromes(field: &GaloisField, codeword: &[u8], ecc: usize, root_base: usize) -> Vec<u8> {
        (0..ecc)
            .map(|i| {
                let root = field.exp(root_base + i);
                codeword.iter().fold(0u8, |acc, &c| field.mul(acc, root) ^ c)
            })
            .collect()
    }

    #[test]
    fn test_field_tables_are_inverse() {
        for f in [&*QR_FIELD, &*DATA_MATRIX_FIELD] {
            assert_eq!(f.exp(0), 1);
            assert_eq!(f.exp(1), 2);
            assert_eq!(f.exp(255), 1); // multiplicative group order
            for a in 1..=255u8 {
                assert_eq!(f.mul(a, 1), a);
                assert_eq!(f.mul(a, 0), 0);
            }
        }
    }

    #[test]
    fn test_fields_differ() {
        // alpha^8 reduces differently under the two polynomials
        assert_eq!(QR_FIELD.exp(8), 0x1D);
        assert_eq!(DATA_MATRIX_FIELD.exp(8), 0x2D);
    }

    #[test]
    fn test_qr_known_vector() {
        // Version 1-M "HELLO WORLD" data codewords and their published
        // 10 error correction codewords.
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let rs = ReedSolomon::new(&QR_FIELD, 0);
        let ecc = rs.remainder(&data, 10);
        assert_eq!(ecc, vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
    }

    #[test]
    fn test_datamatrix_known_vector() {
        // "123456" as three digit-pair codewords in a 10x10 symbol.
        let data = [142, 164, 186];
        let rs = ReedSolomon::new(&DATA_MATRIX_FIELD, 1);
        let ecc = rs.remainder(&data, 5);
        assert_eq!(ecc, vec![114, 25, 5, 88, 102]);
    }

    #[test]
    fn test_qr_codeword_passes_syndrome_check() {
        let data: Vec<u8> = (0u8..19).map(|i| i.wrapping_mul(37) ^ 0x5A).collect();
        let rs = ReedSolomon::new(&QR_FIELD, 0);
        let mut codeword = data.clone();
        codeword.extend(rs.remainder(&data, 7));
        let s = syndromes(&QR_FIELD, &codeword, 7, 0);
        assert!(s.iter().all(|&x| x == 0), "nonzero syndromes: {s:?}");

        // A corrupted codeword must not pass
        codeword[3] ^= 0x41;
        let s = syndromes(&QR_FIELD, &codeword, 7, 0);
        assert!(s.iter().any(|&x| x != 0));
    }

    #[test]
    fn test_datamatrix_codeword_passes_syndrome_check() {
        let data: Vec<u8> = (0u8..12).map(|i| i.wrapping_mul(91).wrapping_add(7)).collect();
        let rs = ReedSolomon::new(&DATA_MATRIX_FIELD, 1);
        let mut codeword = data.clone();
        codeword.extend(rs.remainder(&data, 12));
        let s = syndromes(&DATA_MATRIX_FIELD, &codeword, 12, 1);
        assert!(s.iter().all(|&x| x == 0), "nonzero syndromes: {s:?}");
    }
}
