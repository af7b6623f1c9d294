//! Tile image loading and PNG export of a collapsed grid
//!
//! Abstract row 0 is drawn as the bottom row of the image.

use image::{RgbaImage, imageops};
use ndarray::Array2;
use std::path::Path;

use crate::algorithm::compatibility::TileId;
use crate::io::error::{AlgorithmError, Result, invalid_rule};
use crate::io::rules::RuleSet;
use crate::spatial::Grid;

/// Load every tile image named by the rules, in tile id order
///
/// # Errors
///
/// Returns an error if:
/// - An image cannot be opened or decoded
/// - An image is not exactly `tile_size` pixels square
pub fn load_tile_images(
    rule_set: &RuleSet,
    tiles_dir: &Path,
    tile_size: u32,
) -> Result<Vec<RgbaImage>> {
    rule_set
        .rules()
        .iter()
        .map(|rule| {
            let path = tiles_dir.join(&rule.image);
            let img = image::open(&path)
                .map_err(|e| AlgorithmError::ImageLoad {
                    path: path.clone(),
                    source: e,
                })?
                .to_rgba8();
            if img.dimensions() != (tile_size, tile_size) {
                return Err(invalid_rule(
                    None,
                    &format!(
                        "tile image '{}' is {}x{}, expected {tile_size}x{tile_size}",
                        path.display(),
                        img.width(),
                        img.height()
                    ),
                ));
            }
            Ok(img)
        })
        .collect()
}

/// Composite committed tiles into a `W·S x H·S` image
///
/// Tile `(row, col)` lands at pixel offset `(col·S, (H - 1 - row)·S)`.
///
/// # Errors
///
/// Returns `InvalidTileId` if a committed id has no image
pub fn render_grid(
    tiles: &Array2<TileId>,
    images: &[RgbaImage],
    tile_size: u32,
) -> Result<RgbaImage> {
    let (rows, cols) = tiles.dim();
    let mut canvas = RgbaImage::new(cols as u32 * tile_size, rows as u32 * tile_size);

    for ((row, col), &tile) in tiles.indexed_iter() {
        let tile_image = images.get(tile).ok_or(AlgorithmError::InvalidTileId {
            id: tile,
            tile_count: images.len(),
        })?;
        let x = col as i64 * i64::from(tile_size);
        let y = (rows - 1 - row) as i64 * i64::from(tile_size);
        imageops::replace(&mut canvas, tile_image, x, y);
    }

    Ok(canvas)
}

/// Render a fully collapsed grid and save it as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The grid still has uncollapsed cells
/// - A committed tile has no image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    images: &[RgbaImage],
    tile_size: u32,
    output_path: &Path,
) -> Result<()> {
    let tiles = grid.committed_tiles()?;
    let canvas = render_grid(&tiles, images, tile_size)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %output_path.display(), "wrote generated image");
    Ok(())
}
