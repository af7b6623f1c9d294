//! Frame capture and GIF generation showing the collapse order

use crate::algorithm::executor::CollapseRecord;
use crate::io::configuration::{FINAL_FRAME_HOLD, UNCOLLAPSED_COLOR};
use crate::io::error::{AlgorithmError, Result};
use image::{Delay, Frame, Rgba, RgbaImage, imageops};
use std::path::Path;

/// Replays recorded collapses into animation frames
///
/// The first frame shows the empty grid; each collapse adds one frame with
/// the committed tile drawn in place.
pub struct VisualizationCapture {
    placements: Vec<CollapseRecord>,
    dimensions: (usize, usize),
}

impl VisualizationCapture {
    /// Capture the collapses of a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize, history: &[CollapseRecord]) -> Self {
        Self {
            placements: history.to_vec(),
            dimensions: (rows, cols),
        }
    }

    /// Returns all recorded collapses
    pub fn placements(&self) -> &[CollapseRecord] {
        &self.placements
    }

    /// Number of frames the animation will contain
    pub const fn frame_count(&self) -> usize {
        // Empty grid, one per collapse, held final frame
        self.placements.len() + 2
    }

    /// Export the captured collapses as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No collapses were captured
    /// - A recorded tile has no image
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        images: &[RgbaImage],
        tile_size: u32,
        output_path: &Path,
        frame_delay_ms: u32,
    ) -> Result<()> {
        if self.placements.is_empty() {
            return Err(AlgorithmError::Incomplete {
                uncollapsed: self.dimensions.0 * self.dimensions.1,
            });
        }

        let frames = self.generate_frames(images, tile_size, frame_delay_ms)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %output_path.display(), frames = self.frame_count(), "wrote collapse animation");
        Ok(())
    }

    fn generate_frames(
        &self,
        images: &[RgbaImage],
        tile_size: u32,
        delay_ms: u32,
    ) -> Result<Vec<Frame>> {
        let (rows, cols) = self.dimensions;
        let mut canvas = RgbaImage::from_pixel(
            cols as u32 * tile_size,
            rows as u32 * tile_size,
            Rgba(UNCOLLAPSED_COLOR),
        );
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);

        let mut frames = Vec::with_capacity(self.frame_count());
        frames.push(Frame::from_parts(canvas.clone(), 0, 0, delay));

        for placement in &self.placements {
            let tile_image = images
                .get(placement.tile)
                .ok_or(AlgorithmError::InvalidTileId {
                    id: placement.tile,
                    tile_count: images.len(),
                })?;
            if placement.row >= rows || placement.col >= cols {
                return Err(AlgorithmError::OutOfBounds {
                    row: placement.row,
                    col: placement.col,
                    dimensions: self.dimensions,
                });
            }
            let x = placement.col as i64 * i64::from(tile_size);
            let y = (rows - 1 - placement.row) as i64 * i64::from(tile_size);
            imageops::replace(&mut canvas, tile_image, x, y);
            frames.push(Frame::from_parts(canvas.clone(), 0, 0, delay));
        }

        // Final frame displays longer for better visibility
        frames.push(Frame::from_parts(
            canvas,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms * FINAL_FRAME_HOLD, 1),
        ));

        Ok(frames)
    }
}
