//! Gaussian blur approximation for glow layers.
//!
//! Three successive box blurs per axis converge on a Gaussian closely enough
//! for a soft halo, at constant cost per pixel regardless of radius.
//! Operates on premultiplied RGBA, so every channel blurs the same way and
//! the result stays a valid premultiplied image.

use tiny_skia::Pixmap;

const PASSES: usize = 3;

/// Box widths (odd) whose successive application approximates a Gaussian
/// with standard deviation `sigma`.
pub fn box_sizes(sigma: f32) -> [usize; PASSES] {
    let n = PASSES as f32;
    let ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut lower = ideal.floor().max(1.0) as i32;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let upper = lower + 2;
    let lw = lower as f32;
    let m_ideal = (12.0 * sigma * sigma - n * lw * lw - 4.0 * n * lw - 3.0 * n) / (-4.0 * lw - 4.0);
    let m = m_ideal.round().max(0.0) as usize;

    let mut sizes = [0; PASSES];
    for (i, size) in sizes.iter_mut().enumerate() {
        *size = if i < m { lower as usize } else { upper as usize };
    }
    sizes
}

/// Blur `pixmap` in place with a Gaussian of standard deviation `sigma`.
pub fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
    if !sigma.is_finite() || sigma <= 0.0 {
        return;
    }
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];

    for size in box_sizes(sigma) {
        let radius = size / 2;
        if radius == 0 {
            continue;
        }
        // rows
        for y in 0..height {
            let start = y * width * 4;
            box_blur_line(data, &mut scratch, start, width, 4, radius);
        }
        // columns
        for x in 0..width {
            let start = x * 4;
            box_blur_line(&scratch, data, start, height, width * 4, radius);
        }
    }
}

/// One-dimensional box blur of `len` pixels starting at byte `start`,
/// `stride` bytes apart. Pixels outside the line count as transparent.
fn box_blur_line(src: &[u8], dst: &mut [u8], start: usize, len: usize, stride: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    for channel in 0..4 {
        let at = |i: usize| start + i * stride + channel;
        let mut sum: u32 = (0..=radius.min(len - 1)).map(|i| src[at(i)] as u32).sum();
        for i in 0..len {
            dst[at(i)] = ((sum + window / 2) / window) as u8;
            let incoming = i + radius + 1;
            if incoming < len {
                sum += src[at(incoming)] as u32;
            }
            if i >= radius {
                sum -= src[at(i - radius)] as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sigma_is_identity() {
        assert_eq!(box_sizes(0.5), [1, 1, 1]);
    }

    #[test]
    fn sizes_grow_with_sigma() {
        let small: usize = box_sizes(2.0).iter().sum();
        let large: usize = box_sizes(10.0).iter().sum();
        assert!(large > small);
        assert!(box_sizes(10.0).iter().all(|s| s % 2 == 1));
    }

    #[test]
    fn blur_spreads_a_single_pixel() {
        let mut pixmap = Pixmap::new(21, 21).unwrap();
        let idx = (10 * 21 + 10) * 4;
        pixmap.data_mut()[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        gaussian_blur(&mut pixmap, 3.0);

        let alpha = |x: u32, y: u32| pixmap.pixel(x, y).unwrap().alpha();
        assert!(alpha(10, 10) < 255);
        assert!(alpha(12, 10) > 0, "neighbours should pick up coverage");
        assert!(alpha(10, 10) >= alpha(13, 10));
        let (h, v) = (alpha(12, 10) as i32, alpha(10, 12) as i32);
        assert!((h - v).abs() <= 2, "blur should be near-symmetric: {h} vs {v}");
    }

    #[test]
    fn blur_preserves_premultiplication() {
        let mut pixmap = Pixmap::new(9, 9).unwrap();
        let idx = (4 * 9 + 4) * 4;
        pixmap.data_mut()[idx..idx + 4].copy_from_slice(&[100, 20, 0, 200]);
        gaussian_blur(&mut pixmap, 2.0);
        for px in pixmap.pixels() {
            assert!(px.red() <= px.alpha() && px.green() <= px.alpha());
        }
    }
}
