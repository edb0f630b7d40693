/// Running per-channel average over an arbitrary number of pixels.
///
/// Every averaging path in the compositor (axis downsampling, repeat
/// tiling) funnels through this type. The division truncates; that floor
/// behavior is part of the output contract, not an accident.
#[derive(Clone, Debug)]
pub struct PixelAverager {
    sums: Vec<u32>,
    count: u32,
}

impl PixelAverager {
    pub fn new(bytes_per_pixel: usize) -> Self {
        Self {
            sums: vec![0; bytes_per_pixel],
            count: 0,
        }
    }

    /// Accumulate one pixel. `pixel` must hold exactly `bytes_per_pixel`
    /// channel bytes.
    pub fn add(&mut self, pixel: &[u8]) {
        debug_assert_eq!(pixel.len(), self.sums.len());
        for (sum, &byte) in self.sums.iter_mut().zip(pixel) {
            *sum += u32::from(byte);
        }
        self.count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Write the truncated per-channel average into `destination` and reset
    /// to empty. A flush with no contributions leaves `destination`
    /// untouched.
    pub fn write_average(&mut self, destination: &mut [u8]) {
        if self.count == 0 {
            return;
        }
        debug_assert_eq!(destination.len(), self.sums.len());
        for (dst, sum) in destination.iter_mut().zip(self.sums.iter_mut()) {
            *dst = (*sum / self.count) as u8;
            *sum = 0;
        }
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_truncates_per_channel() {
        let mut avg = PixelAverager::new(3);
        avg.add(&[10, 0, 255]);
        avg.add(&[21, 1, 254]);
        let mut out = [0u8; 3];
        avg.write_average(&mut out);
        assert_eq!(out, [15, 0, 254]);
    }

    #[test]
    fn flush_resets_state() {
        let mut avg = PixelAverager::new(1);
        avg.add(&[100]);
        let mut out = [0u8; 1];
        avg.write_average(&mut out);
        assert_eq!(out, [100]);
        assert!(avg.is_empty());

        avg.add(&[7]);
        avg.write_average(&mut out);
        assert_eq!(out, [7], "stale sums must not leak into the next flush");
    }

    #[test]
    fn empty_flush_is_a_noop() {
        let mut avg = PixelAverager::new(2);
        let mut out = [42u8, 43u8];
        avg.write_average(&mut out);
        assert_eq!(out, [42, 43]);
    }

    #[test]
    fn single_pixel_average_is_identity() {
        let mut avg = PixelAverager::new(4);
        avg.add(&[1, 2, 3, 4]);
        let mut out = [0u8; 4];
        avg.write_average(&mut out);
        assert_eq!(out, [1, 2, 3, 4]);
    }
}
