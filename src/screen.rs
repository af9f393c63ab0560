// Renders a calculator readout onto a monochrome panel

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::calculator::Readout;

/// Size of the OLED panel the layout is designed for
pub const SCREEN_SIZE: Size = Size::new(132, 64);

const MARGIN: i32 = 2;
const EXPRESSION_TOP: i32 = 2;
const CURRENT_TOP: i32 = 16;

/// Draw `readout` onto `target`, replacing whatever was there.
///
/// Layout, top to bottom: pending expression (small, right aligned), current
/// value (large, right aligned, small if it does not fit), error line.
pub fn draw_readout<D>(target: &mut D, readout: &Readout) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let area = target.bounding_box();
    let width = area.size.width;
    let right = area.top_left.x + width as i32 - MARGIN;

    target.clear(BinaryColor::Off)?;

    let right_aligned = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();

    if !readout.expression.is_empty() {
        let text = fit_tail(&readout.expression, columns(width, &FONT_6X10));
        Text::with_text_style(
            &text,
            Point::new(right, area.top_left.y + EXPRESSION_TOP),
            MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
            right_aligned,
        )
        .draw(target)?;
    }

    let font = if readout.current.chars().count() <= columns(width, &FONT_10X20) {
        &FONT_10X20
    } else {
        &FONT_6X10
    };
    let text = fit_tail(&readout.current, columns(width, font));
    Text::with_text_style(
        &text,
        Point::new(right, area.top_left.y + CURRENT_TOP),
        MonoTextStyle::new(font, BinaryColor::On),
        right_aligned,
    )
    .draw(target)?;

    if let Some(message) = readout.error {
        let bottom = area.top_left.y + area.size.height as i32 - MARGIN;
        Text::with_baseline(
            message,
            Point::new(area.top_left.x + MARGIN, bottom),
            MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
            Baseline::Bottom,
        )
        .draw(target)?;
    }

    Ok(())
}

fn columns(width: u32, font: &MonoFont<'_>) -> usize {
    let usable = width.saturating_sub(2 * MARGIN as u32);
    (usable / (font.character_size.width + font.character_spacing)) as usize
}

/// Keep the end of `text`, marking a cut with `<`
fn fit_tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.into();
    }
    if max_chars == 0 {
        return String::new();
    }

    let keep = max_chars.saturating_sub(1);
    let mut fitted = String::from("<");
    fitted.extend(text.chars().skip(count - keep));
    fitted
}

/// In-memory monochrome frame buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    size: Size,
    pixels: Vec<bool>,
}

impl Framebuffer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![false; (size.width * size.height) as usize],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        (x < self.size.width && y < self.size.height).then(|| (y * self.size.width + x) as usize)
    }

    pub fn is_on(&self, point: Point) -> bool {
        self.index(point).is_some_and(|i| self.pixels[i])
    }

    /// Number of lit pixels in the rows `top..bottom`
    pub fn lit_pixels(&self, top: u32, bottom: u32) -> usize {
        let width = self.size.width as usize;
        let bottom = bottom.min(self.size.height) as usize;
        let top = (top as usize).min(bottom);

        self.pixels[top * width..bottom * width]
            .iter()
            .filter(|on| **on)
            .count()
    }

    /// One text line per pixel row, `#` for lit pixels
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.size.width + 1) * self.size.height) as usize);
        if self.size.width == 0 {
            out.extend((0..self.size.height).map(|_| '\n'));
            return out;
        }

        for row in self.pixels.chunks(self.size.width as usize) {
            out.extend(row.iter().map(|on| if *on { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color.is_on();
            }
        }

        Ok(())
    }
}
