// Per-pixel occupancy masks for exact collision tests.

/// Pixel coordinate inside a mask.
pub type Pixel = (u32, u32);

/// Immutable occupancy bitmap. A set bit means the pixel is solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Builds a mask from row-major bits. Returns `None` when the bit count
    /// does not match the dimensions.
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Option<Self> {
        if bits.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits,
        })
    }

    /// A fully solid mask, used for sprites without transparency.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width as usize * height as usize],
        }
    }

    /// Builds a mask by evaluating `solid` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut solid: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(solid(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel is solid. Out-of-range pixels are empty.
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of solid pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Places `other` with its top-left corner at `offset` (in this mask's
    /// frame) and returns the first pixel solid in both, in this mask's
    /// coordinates. Rows are scanned top to bottom, each left to right.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<Pixel> {
        let (ox, oy) = (i64::from(offset.0), i64::from(offset.1));

        // Intersection of both rectangles in this mask's frame.
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (ox + i64::from(other.width)).min(i64::from(self.width));
        let y_end = (oy + i64::from(other.height)).min(i64::from(self.height));
        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_masks_are_far_apart_then_overlap_is_none() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);

        assert_eq!(a.overlap(&b, (500, 500)), None);
        assert_eq!(a.overlap(&b, (-500, 3)), None);
    }

    #[test]
    fn when_identical_masks_share_origin_then_overlap_is_found() {
        let a = Mask::filled(4, 4);

        assert_eq!(a.overlap(&a.clone(), (0, 0)), Some((0, 0)));
    }

    #[test]
    fn when_rectangles_touch_but_pixels_do_not_then_overlap_is_none() {
        // A thin diagonal line: the bounding boxes overlap everywhere but the
        // only solid pixels of `probe` land on empty pixels of `line`.
        let line = Mask::from_fn(8, 8, |x, y| x == y);
        let probe = Mask::from_fn(2, 2, |x, y| x == 1 && y == 0);

        assert_eq!(line.overlap(&probe, (3, 3)), None);
        assert_eq!(line.overlap(&probe, (3, 4)), Some((4, 4)));
    }

    #[test]
    fn when_other_is_offset_negatively_then_point_is_in_self_coordinates() {
        let target = Mask::filled(5, 5);
        let car = Mask::filled(3, 3);

        assert_eq!(target.overlap(&car, (-2, -2)), Some((0, 0)));
        assert_eq!(target.overlap(&car, (4, -1)), Some((4, 0)));
    }

    #[test]
    fn when_several_pixels_overlap_then_topmost_row_wins() {
        let target = Mask::from_fn(6, 6, |x, y| (y == 2 && x == 5) || (y == 4 && x == 0));
        let car = Mask::filled(6, 6);

        assert_eq!(target.overlap(&car, (0, 0)), Some((5, 2)));
    }

    #[test]
    fn when_bits_do_not_match_dimensions_then_from_bits_rejects() {
        assert!(Mask::from_bits(3, 3, vec![true; 8]).is_none());
        let mask = Mask::from_bits(2, 1, vec![false, true]).expect("valid dimensions");
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
        assert_eq!(mask.count(), 1);
    }
}
