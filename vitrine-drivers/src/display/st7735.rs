//! ST7735 TFT Display Driver
//!
//! Driver for 128x160 ST7735-based RGB565 TFT panels via SPI.
//! Widgets render into a `FrameDc`; `flush` pushes the finished frame
//! to the panel row by row.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use vitrine_draw::FrameDc;

/// ST7735 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x05;

/// Row/column order for portrait mounting, RGB subpixel order
const MADCTL_PORTRAIT: u8 = 0x00;

/// Pixels buffered per SPI write during flush
const CHUNK_PIXELS: usize = 128;

/// ST7735 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7735Error {
    /// SPI transfer failed
    Spi,
    /// Data/command pin failed
    Pin,
}

/// ST7735 TFT driver
///
/// `SPI` carries pixel data and commands; `DC` is the data/command
/// select pin (low = command, high = data).
pub struct St7735<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> St7735<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new driver
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Send a command byte
    async fn command(&mut self, cmd: u8) -> Result<(), St7735Error> {
        self.dc.set_low().map_err(|_| St7735Error::Pin)?;
        self.spi.write(&[cmd]).await.map_err(|_| St7735Error::Spi)
    }

    /// Send data bytes for the previous command
    async fn data(&mut self, data: &[u8]) -> Result<(), St7735Error> {
        self.dc.set_high().map_err(|_| St7735Error::Pin)?;
        self.spi.write(data).await.map_err(|_| St7735Error::Spi)
    }

    /// Initialize the panel
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), St7735Error> {
        self.command(cmd::SWRESET).await?;
        delay.delay_ms(120).await;
        self.command(cmd::SLPOUT).await?;
        delay.delay_ms(120).await;

        self.command(cmd::COLMOD).await?;
        self.data(&[COLMOD_RGB565]).await?;
        self.command(cmd::MADCTL).await?;
        self.data(&[MADCTL_PORTRAIT]).await?;

        self.command(cmd::DISPON).await?;
        delay.delay_ms(20).await;
        Ok(())
    }

    /// Select the drawing window (inclusive corner coordinates)
    async fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), St7735Error> {
        self.command(cmd::CASET).await?;
        let x0 = x0.to_be_bytes();
        let x1 = x1.to_be_bytes();
        self.data(&[x0[0], x0[1], x1[0], x1[1]]).await?;

        self.command(cmd::RASET).await?;
        let y0 = y0.to_be_bytes();
        let y1 = y1.to_be_bytes();
        self.data(&[y0[0], y0[1], y1[0], y1[1]]).await
    }

    /// Push a frame to the panel
    ///
    /// No-op while the frame is clean; marks it clean afterwards.
    pub async fn flush<const W: usize, const H: usize>(
        &mut self,
        frame: &mut FrameDc<W, H>,
    ) -> Result<(), St7735Error> {
        if !frame.is_dirty() {
            return Ok(());
        }

        self.set_window(0, 0, W as u16 - 1, H as u16 - 1).await?;
        self.command(cmd::RAMWR).await?;

        let mut line = [0u8; CHUNK_PIXELS * 2];
        for y in 0..H {
            let Some(row) = frame.row_words(y) else {
                break;
            };
            for chunk in row.chunks(CHUNK_PIXELS) {
                for (i, px) in chunk.iter().enumerate() {
                    let [hi, lo] = px.to_be_bytes();
                    line[i * 2] = hi;
                    line[i * 2 + 1] = lo;
                }
                self.data(&line[..chunk.len() * 2]).await?;
            }
        }

        frame.mark_clean();
        Ok(())
    }

    /// Turn the panel on or off
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), St7735Error> {
        if on {
            self.command(cmd::DISPON).await
        } else {
            self.command(cmd::DISPOFF).await
        }
    }

    /// Invert panel colors
    pub async fn set_inverted(&mut self, inverted: bool) -> Result<(), St7735Error> {
        if inverted {
            self.command(cmd::INVON).await
        } else {
            self.command(cmd::INVOFF).await
        }
    }

    /// Enter or leave panel sleep
    pub async fn set_sleep<D: DelayNs>(
        &mut self,
        delay: &mut D,
        sleep: bool,
    ) -> Result<(), St7735Error> {
        if sleep {
            self.command(cmd::SLPIN).await?;
        } else {
            self.command(cmd::SLPOUT).await?;
        }
        delay.delay_ms(120).await;
        Ok(())
    }
}
