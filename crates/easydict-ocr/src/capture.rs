use anyhow::{Context, Result, bail};
use image::{ExtendedColorType, ImageEncoder};
use xcap::Monitor;

/// Raw RGBA pixels, row-major, 4 bytes per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Source of full-screen frames
pub trait ScreenGrabber: Send + Sync {
    fn grab(&self) -> Result<Frame>;
}

/// Grabs the primary monitor through xcap
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn grab(&self) -> Result<Frame> {
        let monitors = Monitor::all().context("Failed to get monitors")?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary())
            .or(monitors.first())
            .context("No monitor found")?;

        let image = monitor.capture_image().context("Failed to capture screen")?;
        Ok(Frame {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }
}

/// Cut a region out of `frame`, clamping it to the frame bounds
pub fn crop_rgba(frame: &Frame, x: u32, y: u32, width: u32, height: u32) -> Result<Frame> {
    let cx = x.min(frame.width.saturating_sub(1));
    let cy = y.min(frame.height.saturating_sub(1));
    let cw = width.min(frame.width.saturating_sub(cx));
    let ch = height.min(frame.height.saturating_sub(cy));

    if cw == 0 || ch == 0 {
        bail!("Selected region is empty");
    }

    let stride = frame.width as usize * 4;
    let expected = stride * frame.height as usize;
    if frame.rgba.len() < expected {
        bail!(
            "Frame buffer too small: {} bytes for {}x{}",
            frame.rgba.len(),
            frame.width,
            frame.height
        );
    }

    tracing::debug!("Cropping {}x{} at ({},{})", cw, ch, cx, cy);

    let mut rgba = Vec::with_capacity(cw as usize * ch as usize * 4);
    for row in cy..cy + ch {
        let start = row as usize * stride + cx as usize * 4;
        let end = start + cw as usize * 4;
        rgba.extend_from_slice(&frame.rgba[start..end]);
    }

    Ok(Frame {
        rgba,
        width: cw,
        height: ch,
    })
}

pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(&frame.rgba, frame.width, frame.height, ExtendedColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel stores its own (x, y) in the red and green channels
    fn gradient(width: u32, height: u32) -> Frame {
        let mut rgba = Vec::new();
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Frame { rgba, width, height }
    }

    #[test]
    fn crops_inner_region() {
        let frame = gradient(4, 4);
        let cropped = crop_rgba(&frame, 1, 2, 2, 2).unwrap();

        assert_eq!((cropped.width, cropped.height), (2, 2));
        assert_eq!(&cropped.rgba[0..2], &[1, 2]);
        assert_eq!(&cropped.rgba[4..6], &[2, 2]);
        assert_eq!(&cropped.rgba[8..10], &[1, 3]);
    }

    #[test]
    fn clamps_region_overflowing_the_frame() {
        let frame = gradient(4, 3);
        let cropped = crop_rgba(&frame, 2, 1, 100, 100).unwrap();
        assert_eq!((cropped.width, cropped.height), (2, 2));

        let cropped = crop_rgba(&frame, 50, 50, 10, 10).unwrap();
        assert_eq!((cropped.width, cropped.height), (1, 1));
        assert_eq!(&cropped.rgba[0..2], &[3, 2]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let frame = gradient(4, 4);
        assert!(crop_rgba(&frame, 0, 0, 0, 3).is_err());
    }

    #[test]
    fn png_has_signature() {
        let png = encode_png(&gradient(2, 2)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
