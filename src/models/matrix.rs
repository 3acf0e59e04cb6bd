use qrcode::QrCode;
use qrcode::types::Color;

/// Square grid of QR modules (true = dark, false = light)
#[derive(Debug, Clone)]
pub struct BitMatrix {
    size: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix with `size` modules per side
    pub fn new(size: usize) -> Self {
        let bytes_needed = (size * size).div_ceil(8);
        Self {
            size,
            data: vec![0; bytes_needed],
        }
    }

    /// Copy the module layout out of an encoded QR symbol
    pub fn from_symbol(code: &QrCode) -> Self {
        let size = code.width();
        let mut matrix = Self::new(size);
        for (index, color) in code.to_colors().into_iter().enumerate() {
            if color == Color::Dark {
                matrix.set(index % size, index / size, true);
            }
        }
        matrix
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get module at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        let index = y * self.size + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module at (x, y)
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if dark {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }
}
