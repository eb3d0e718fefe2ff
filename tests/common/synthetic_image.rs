use std::cell::Cell;
use tile_mosaic::{OwnedRaster, RasterSurface, SurfaceError};

/// Uniform surface of `channels` samples per pixel.
pub fn uniform(width: usize, height: usize, channels: usize, value: u8) -> OwnedRaster {
    OwnedRaster::filled(width, height, channels, &[value; 4][..channels])
}

/// RGB surface that is `dark` left of column `edge_x` and `bright` from it on.
pub fn vertical_edge(width: usize, height: usize, edge_x: usize, dark: u8, bright: u8) -> OwnedRaster {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..height {
        for x in 0..width {
            let v = if x < edge_x { dark } else { bright };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    OwnedRaster::from_raw(width, height, 3, data).expect("sized buffer")
}

/// Wraps a surface and counts block reads and writes.
pub struct CountingSurface<S> {
    pub inner: S,
    pub reads: Cell<usize>,
    pub writes: usize,
}

impl<S: RasterSurface> CountingSurface<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
            writes: 0,
        }
    }
}

impl<S: RasterSurface> RasterSurface for CountingSurface<S> {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn channels(&self) -> usize {
        self.inner.channels()
    }

    fn get_block(&self, x: usize, y: usize, w: usize, h: usize) -> Result<Vec<u8>, SurfaceError> {
        self.reads.set(self.reads.get() + 1);
        self.inner.get_block(x, y, w, h)
    }

    fn set_block(
        &mut self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        data: &[u8],
    ) -> Result<(), SurfaceError> {
        self.writes += 1;
        self.inner.set_block(x, y, w, h, data)
    }
}

/// Surface that claims an unsupported channel count.
pub struct FiveChannels;

impl RasterSurface for FiveChannels {
    fn width(&self) -> usize {
        16
    }

    fn height(&self) -> usize {
        16
    }

    fn channels(&self) -> usize {
        5
    }

    fn get_block(&self, _x: usize, _y: usize, _w: usize, _h: usize) -> Result<Vec<u8>, SurfaceError> {
        panic!("pixels must not be read for a rejected request");
    }

    fn set_block(
        &mut self,
        _x: usize,
        _y: usize,
        _w: usize,
        _h: usize,
        _data: &[u8],
    ) -> Result<(), SurfaceError> {
        panic!("pixels must not be written for a rejected request");
    }
}
