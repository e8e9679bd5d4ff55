/// A single still image or video frame: contiguous RGB24 bytes in
/// row-major order.
///
/// Format conversion happens at I/O boundaries only; the pipeline
/// derives its own luma view before detection.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ordinal position within the source stream (0 for still images).
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2 RGB
        let frame = Frame::new(data.clone(), 2, 2, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 0);
        let cloned = frame.clone();
        drop(frame);
        assert_eq!(cloned.data()[0], 100);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2 RGB
        Frame::new(data, 2, 2, 0);
    }
}
