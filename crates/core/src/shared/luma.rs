use crate::shared::frame::Frame;

/// A single-channel luma image: one byte per pixel, row-major.
///
/// Face detection and the emotion classifier both operate on luma;
/// [`LumaFrame::from_frame`] is the only color-space conversion in the
/// pipeline.
#[derive(Clone, Debug)]
pub struct LumaFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl LumaFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Converts an RGB frame to luma using the BT.601 weights.
    pub fn from_frame(frame: &Frame) -> Self {
        let data = frame
            .data()
            .chunks_exact(3)
            .map(|px| {
                let y = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                y.round().min(255.0) as u8
            })
            .collect();
        Self {
            data,
            width: frame.width(),
            height: frame.height(),
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

    /// Extracts the rectangle `[x1, x2) × [y1, y2)`, clamped to the frame
    /// bounds. Returns `None` when the clamped intersection is empty.
    pub fn crop(&self, x1: i32, x2: i32, y1: i32, y2: i32) -> Option<LumaFrame> {
        let x1 = x1.clamp(0, self.width as i32) as usize;
        let x2 = x2.clamp(0, self.width as i32) as usize;
        let y1 = y1.clamp(0, self.height as i32) as usize;
        let y2 = y2.clamp(0, self.height as i32) as usize;
        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        let w = x2 - x1;
        let mut data = Vec::with_capacity(w * (y2 - y1));
        for row in y1..y2 {
            let start = row * self.width as usize + x1;
            data.extend_from_slice(&self.data[start..start + w]);
        }
        Some(LumaFrame::new(data, w as u32, (y2 - y1) as u32))
    }

    /// Resamples to `width × height` by picking the source pixel under
    /// each destination pixel center.
    pub fn resize(&self, width: u32, height: u32) -> LumaFrame {
        let src_w = self.width as usize;
        let src_h = self.height as usize;
        let dst_w = width as usize;
        let dst_h = height as usize;

        let mut data = Vec::with_capacity(dst_w * dst_h);
        for y in 0..dst_h {
            let src_y = (((y as f64 + 0.5) * src_h as f64 / dst_h as f64) as usize).min(src_h - 1);
            for x in 0..dst_w {
                let src_x =
                    (((x as f64 + 0.5) * src_w as f64 / dst_w as f64) as usize).min(src_w - 1);
                data.push(self.data[src_y * src_w + src_x]);
            }
        }
        LumaFrame::new(data, width, height)
    }
}
