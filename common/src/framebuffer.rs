//! Fixed-size 1-bpp pixel buffers and borrowed horizontal views into them.
//!
//! Pixels are packed row-major, eight per byte, most significant bit first.
//! Rows are byte aligned (width is a multiple of 8), so a band of rows is a
//! contiguous byte slice and copying or cropping rows is a plain memory copy.
//!
//! A [`Region`] is the crop handed to the display driver each frame. It
//! borrows the buffer instead of copying it, which keeps the frame path free
//! of allocation.

use core::convert::Infallible;

use embedded_graphics::image::ImageDrawable;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A monochrome pixel buffer of `N` bytes with a fixed width.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer<const N: usize> {
    bytes: [u8; N],
    width: u32,
}

impl<const N: usize> core::fmt::Debug for Framebuffer<N> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height())
            .field("lit", &self.bytes.iter().map(|b| b.count_ones()).sum::<u32>())
            .finish()
    }
}

impl<const N: usize> Framebuffer<N> {
    /// Create a blank buffer `width` pixels wide; height is implied by `N`.
    ///
    /// # Panics
    /// If `width` is not a multiple of 8 or `N` is not a whole number of rows.
    pub const fn new(width: u32) -> Self {
        assert!(width > 0 && width % 8 == 0, "width must be a non-zero multiple of 8");
        assert!(N % (width as usize / 8) == 0, "buffer must hold whole rows");
        Self { bytes: [0u8; N], width }
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { (N / self.line_bytes()) as u32 }

    #[inline]
    const fn line_bytes(&self) -> usize { self.width as usize / 8 }

    /// Raw packed pixels.
    #[inline]
    pub const fn bytes(&self) -> &[u8; N] { &self.bytes }

    /// Turn every pixel off.
    pub fn erase(&mut self) { self.bytes.fill(0); }

    /// Set a pixel. Returns `false` if the point lies outside the buffer.
    pub fn set_pixel(
        &mut self,
        x: u32,
        y: u32,
        on: bool,
    ) -> bool {
        if x >= self.width || y >= self.height() {
            return false;
        }
        let index = y as usize * self.line_bytes() + x as usize / 8;
        let mask = 0x80u8 >> (x % 8);
        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
        true
    }

    /// Read a pixel, `None` outside the buffer.
    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> Option<bool> {
        if x >= self.width || y >= self.height() {
            return None;
        }
        let index = y as usize * self.line_bytes() + x as usize / 8;
        Some(self.bytes[index] & (0x80 >> (x % 8)) != 0)
    }

    /// Copy `rows` pixel rows starting at `src_y` so they start at `dst_y`.
    ///
    /// # Panics
    /// If either band reaches past the bottom of the buffer.
    pub fn copy_rows(
        &mut self,
        src_y: u32,
        dst_y: u32,
        rows: u32,
    ) {
        let height = self.height();
        assert!(src_y + rows <= height, "source rows {src_y}+{rows} outside buffer of height {height}");
        assert!(dst_y + rows <= height, "target rows {dst_y}+{rows} outside buffer of height {height}");
        let lb = self.line_bytes();
        let src = src_y as usize * lb..(src_y + rows) as usize * lb;
        self.bytes.copy_within(src, dst_y as usize * lb);
    }

    /// Borrow `height` rows starting at `y`.
    ///
    /// # Panics
    /// If the band reaches past the bottom of the buffer. A crop outside the
    /// buffer means the page geometry is wrong, so it is not clamped.
    pub fn region(
        &self,
        y: u32,
        height: u32,
    ) -> Region<'_> {
        let buffer_height = self.height();
        assert!(
            y + height <= buffer_height,
            "region {y}+{height} outside buffer of height {buffer_height}"
        );
        let lb = self.line_bytes();
        Region {
            bytes: &self.bytes[y as usize * lb..(y + height) as usize * lb],
            width: self.width,
        }
    }
}

impl<const N: usize> DrawTarget for Framebuffer<N> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set_pixel(point.x as u32, point.y as u32, color.is_on());
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.bytes.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl<const N: usize> OriginDimensions for Framebuffer<N> {
    fn size(&self) -> Size { Size::new(self.width, self.height()) }
}

// =============================================================================
// Region
// =============================================================================

/// A read-only band of full-width rows borrowed from a [`Framebuffer`].
///
/// Two regions compare equal when they hold the same pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region<'a> {
    bytes: &'a [u8],
    width: u32,
}

impl<'a> Region<'a> {
    #[inline]
    const fn line_bytes(&self) -> usize { self.width as usize / 8 }

    #[inline]
    pub const fn height(&self) -> u32 { (self.bytes.len() / self.line_bytes()) as u32 }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    /// Read a pixel, `None` outside the region.
    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> Option<bool> {
        if x >= self.width || y >= self.height() {
            return None;
        }
        let index = y as usize * self.line_bytes() + x as usize / 8;
        Some(self.bytes[index] & (0x80 >> (x % 8)) != 0)
    }

    /// Packed bytes of each row, top to bottom.
    pub fn rows(self) -> impl Iterator<Item = &'a [u8]> { self.bytes.chunks_exact(self.line_bytes()) }

    /// Whether any pixel is on.
    pub fn is_blank(&self) -> bool { self.bytes.iter().all(|&b| b == 0) }

    fn color_at(
        &self,
        point: Point,
    ) -> BinaryColor {
        BinaryColor::from(self.pixel(point.x as u32, point.y as u32).unwrap_or(false))
    }
}

impl OriginDimensions for Region<'_> {
    fn size(&self) -> Size { Size::new(self.width, self.height()) }
}

impl ImageDrawable for Region<'_> {
    type Color = BinaryColor;

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = self.bounding_box();
        target.fill_contiguous(&area, area.points().map(|p| self.color_at(p)))
    }

    fn draw_sub_image<D>(
        &self,
        target: &mut D,
        area: &Rectangle,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        target.fill_contiguous(
            &Rectangle::new(Point::zero(), area.size),
            area.points().map(|p| self.color_at(p)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::image::Image;
    use embedded_graphics::primitives::PrimitiveStyle;

    type Small = Framebuffer<{ 16 * 4 / 8 }>;

    #[test]
    fn test_dimensions() {
        let fb = Small::new(16);
        assert_eq!(fb.size(), Size::new(16, 4));
    }

    #[test]
    fn test_pixel_bit_mapping_is_msb_first() {
        let mut fb = Small::new(16);
        assert!(fb.set_pixel(0, 0, true));
        assert!(fb.set_pixel(7, 0, true));
        assert!(fb.set_pixel(8, 1, true));
        assert_eq!(fb.bytes()[0], 0b1000_0001);
        assert_eq!(fb.bytes()[1], 0);
        assert_eq!(fb.bytes()[3], 0b1000_0000);
    }

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let mut fb = Small::new(16);
        assert!(!fb.set_pixel(16, 0, true));
        assert!(!fb.set_pixel(0, 4, true));
        assert_eq!(fb.pixel(16, 0), None);
        fb.draw_iter([Pixel(Point::new(-1, 0), BinaryColor::On), Pixel(Point::new(3, 9), BinaryColor::On)])
            .unwrap();
        assert!(fb.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_copy_rows() {
        let mut fb = Small::new(16);
        fb.set_pixel(3, 0, true);
        fb.set_pixel(12, 1, true);
        fb.copy_rows(0, 2, 2);
        assert_eq!(fb.pixel(3, 2), Some(true));
        assert_eq!(fb.pixel(12, 3), Some(true));
        assert_eq!(fb.region(0, 2), fb.region(2, 2));
    }

    #[test]
    #[should_panic(expected = "outside buffer")]
    fn test_copy_rows_past_end_panics() {
        let mut fb = Small::new(16);
        fb.copy_rows(0, 3, 2);
    }

    #[test]
    fn test_region_crop() {
        let mut fb = Small::new(16);
        fb.set_pixel(5, 2, true);
        let region = fb.region(2, 2);
        assert_eq!(region.size(), Size::new(16, 2));
        assert_eq!(region.pixel(5, 0), Some(true));
        assert_eq!(region.pixel(5, 1), Some(false));
        assert_eq!(region.rows().count(), 2);
        assert!(!region.is_blank());
        assert!(fb.region(0, 2).is_blank());
    }

    #[test]
    #[should_panic(expected = "outside buffer")]
    fn test_region_past_end_panics() {
        let fb = Small::new(16);
        let _ = fb.region(3, 2);
    }

    #[test]
    fn test_region_blits_onto_target() {
        let mut src = Small::new(16);
        Rectangle::new(Point::new(0, 1), Size::new(4, 1))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut src)
            .unwrap();

        let mut dst = Small::new(16);
        Image::new(&src.region(1, 1), Point::new(8, 3)).draw(&mut dst).unwrap();
        assert_eq!(dst.pixel(8, 3), Some(true));
        assert_eq!(dst.pixel(11, 3), Some(true));
        assert_eq!(dst.pixel(12, 3), Some(false));
        assert_eq!(dst.pixel(0, 3), Some(false));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut fb = Small::new(16);
        fb.clear(BinaryColor::On).unwrap();
        assert_eq!(fb.pixel(15, 3), Some(true));
        fb.erase();
        assert!(fb.region(0, 4).is_blank());
    }
}
