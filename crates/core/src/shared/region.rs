/// A detected face rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Expands the rectangle by `(x_offset, y_offset)` on each side and
    /// returns the corner coordinates as `(x1, x2, y1, y2)`.
    ///
    /// The shipped pipeline passes `(0, 0)`, making this the identity;
    /// the expansion itself is the hook for padding the crop fed to the
    /// classifier.
    pub fn expand(&self, offsets: (i32, i32)) -> (i32, i32, i32, i32) {
        let (x_off, y_off) = offsets;
        (
            self.x - x_off,
            self.x + self.width + x_off,
            self.y - y_off,
            self.y + self.height + y_off,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_expand_zero_offsets_is_identity() {
        let r = Region {
            x: 10,
            y: 20,
            width: 30,
            height: 40,
        };
        assert_eq!(r.expand((0, 0)), (10, 40, 20, 60));
    }

    #[rstest]
    #[case::symmetric((5, 5), (5, 45, 15, 65))]
    #[case::horizontal_only((8, 0), (2, 48, 20, 60))]
    #[case::negative_shrinks((-4, -4), (14, 36, 24, 56))]
    fn test_expand_offsets(
        #[case] offsets: (i32, i32),
        #[case] expected: (i32, i32, i32, i32),
    ) {
        let r = Region {
            x: 10,
            y: 20,
            width: 30,
            height: 40,
        };
        assert_eq!(r.expand(offsets), expected);
    }

    #[test]
    fn test_expand_can_cross_frame_origin() {
        // Clamping is the crop's concern, not the expansion's.
        let r = Region {
            x: 2,
            y: 3,
            width: 10,
            height: 10,
        };
        assert_eq!(r.expand((5, 5)), (-3, 17, -2, 18));
    }
}
