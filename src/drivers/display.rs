// MotionCue — Display Driver
//
// `FrameBuffer` is a 1-bpp 128×64 image in SSD1306 page layout (8 vertical
// pixels per byte, 128 bytes per page).  It implements the embedded-graphics
// `DrawTarget`, so all drawing happens in RAM; a `Screen` then decides where
// the finished buffer goes.  On the firmware that is the OLED over I2C; on
// the host simulator the buffer simply stays in memory.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::*;

pub struct FrameBuffer {
    buffer: [u8; DISPLAY_BUFFER_SIZE],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            buffer: [0; DISPLAY_BUFFER_SIZE],
        }
    }

    /// Raw page-layout bytes, ready to stream to the panel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match locate(Point::new(x, y)) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    pub fn lit_pixels(&self) -> usize {
        self.buffer.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Render the buffer as text rows (`#` lit, `.` dark) for logs and tests.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((SCREEN_WIDTH as usize + 1) * SCREEN_HEIGHT as usize);
        for y in 0..SCREEN_HEIGHT as i32 {
            for x in 0..SCREEN_WIDTH as i32 {
                out.push(if self.pixel(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte index and bit mask for a point, or `None` when off-screen.
fn locate(point: Point) -> Option<(usize, u8)> {
    if point.x < 0 || point.y < 0 || point.x >= SCREEN_WIDTH as i32 || point.y >= SCREEN_HEIGHT as i32 {
        return None;
    }
    let (x, y) = (point.x as usize, point.y as usize);
    Some((x + (y / 8) * SCREEN_WIDTH as usize, 1 << (y % 8)))
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Off-screen pixels are clipped silently; dots may slide past an edge.
        for Pixel(point, color) in pixels {
            if let Some((index, mask)) = locate(point) {
                if color.is_on() {
                    self.buffer[index] |= mask;
                } else {
                    self.buffer[index] &= !mask;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

/// Where a finished frame goes.
pub trait Screen {
    fn canvas(&mut self) -> &mut FrameBuffer;
    fn present(&mut self) -> anyhow::Result<()>;
}

impl Screen for FrameBuffer {
    fn canvas(&mut self) -> &mut FrameBuffer {
        self
    }

    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SSD1306 over the shared I2C bus (firmware only)
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
pub use oled::OledDisplay;

#[cfg(target_os = "espidf")]
mod oled {
    use super::{FrameBuffer, Screen};
    use crate::config::*;
    use crate::drivers::imu::SharedBus;

    const CONTROL_COMMAND: u8 = 0x00;
    const CONTROL_DATA: u8 = 0x40;

    // 128×64, internal charge pump, horizontal addressing, flipped to match
    // the watch-style mounting.
    const INIT_SEQUENCE: &[u8] = &[
        0xAE, // display off
        0xD5, 0x80, // clock divide
        0xA8, 0x3F, // multiplex 64
        0xD3, 0x00, // display offset
        0x40, // start line 0
        0x8D, 0x14, // charge pump on
        0x20, 0x00, // horizontal addressing
        0xA1, // segment remap
        0xC8, // COM scan descending
        0xDA, 0x12, // COM pins
        0x81, 0xCF, // contrast
        0xD9, 0xF1, // pre-charge
        0xDB, 0x40, // VCOMH deselect
        0xA4, // resume from RAM
        0xA6, // normal (not inverted)
        0xAF, // display on
    ];

    pub struct OledDisplay {
        bus: SharedBus,
        frame: FrameBuffer,
    }

    impl OledDisplay {
        pub fn new(bus: SharedBus) -> Self {
            Self {
                bus,
                frame: FrameBuffer::new(),
            }
        }

        pub fn is_connected(&self) -> bool {
            self.command(&[0xE3]).is_ok() // NOP
        }

        pub fn init(&mut self) -> anyhow::Result<()> {
            self.command(INIT_SEQUENCE)?;
            self.present()?;
            log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
            Ok(())
        }

        pub fn turn_off(&mut self) -> anyhow::Result<()> {
            self.command(&[0xAE])
        }

        fn command(&self, bytes: &[u8]) -> anyhow::Result<()> {
            let mut bus = self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let mut packet = Vec::with_capacity(bytes.len() + 1);
            packet.push(CONTROL_COMMAND);
            packet.extend_from_slice(bytes);
            bus.write(I2C_ADDR_OLED, &packet, I2C_TIMEOUT_TICKS)?;
            Ok(())
        }
    }

    impl Screen for OledDisplay {
        fn canvas(&mut self) -> &mut FrameBuffer {
            &mut self.frame
        }

        fn present(&mut self) -> anyhow::Result<()> {
            // Full-screen window, then stream every page.
            self.command(&[0x21, 0, (SCREEN_WIDTH - 1) as u8, 0x22, 0, (SCREEN_HEIGHT / 8 - 1) as u8])?;

            let mut packet = Vec::with_capacity(DISPLAY_BUFFER_SIZE + 1);
            packet.push(CONTROL_DATA);
            packet.extend_from_slice(self.frame.as_bytes());

            let mut bus = self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            bus.write(I2C_ADDR_OLED, &packet, I2C_TIMEOUT_TICKS)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn pixels_land_in_page_layout() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(3, 10), BinaryColor::On).draw(&mut fb).unwrap();

        assert!(fb.pixel(3, 10));
        // page 1, column 3, bit 2
        assert_eq!(fb.as_bytes()[3 + 128], 0b0000_0100);
        assert_eq!(fb.lit_pixels(), 1);
    }

    #[test]
    fn off_screen_pixels_are_clipped() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(-5, -5), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.lit_pixels(), 25);
        assert!(!fb.pixel(-1, 0));
        assert!(!fb.pixel(200, 0));
    }

    #[test]
    fn clear_fills_whole_buffer() {
        let mut fb = FrameBuffer::new();
        fb.clear(BinaryColor::On).unwrap();
        assert_eq!(fb.lit_pixels(), (SCREEN_WIDTH * SCREEN_HEIGHT) as usize);
        fb.clear(BinaryColor::Off).unwrap();
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn ascii_dump_has_one_row_per_line() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut fb).unwrap();
        let dump = fb.to_ascii();
        assert_eq!(dump.lines().count(), SCREEN_HEIGHT as usize);
        assert!(dump.starts_with("#."));
    }
}
