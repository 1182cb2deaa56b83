// render.rs - Converts the current generation into a texture image

use egui::{Color32, ColorImage};
use life_engine::Grid;

/// One pixel per cell, blended from `dead` at 0 to `live` at 1.
///
/// With black and white this is plain greyscale, `value * 255`.
pub fn to_color_image(grid: &Grid, dead: Color32, live: Color32) -> ColorImage {
    let pixels = grid.cells().iter().map(|&v| blend(dead, live, v)).collect();
    ColorImage { size: [grid.width(), grid.height()], pixels }
}

pub fn blend(dead: Color32, live: Color32, value: f32) -> Color32 {
    let t = value.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(mix(dead.r(), live.r()), mix(dead.g(), live.g()), mix(dead.b(), live.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_to_white_is_greyscale() {
        assert_eq!(blend(Color32::BLACK, Color32::WHITE, 0.0), Color32::from_gray(0));
        assert_eq!(blend(Color32::BLACK, Color32::WHITE, 1.0), Color32::from_gray(255));
        assert_eq!(blend(Color32::BLACK, Color32::WHITE, 0.5), Color32::from_gray(128));
    }

    #[test]
    fn image_matches_grid_layout() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 1, 1.0);
        let image = to_color_image(&grid, Color32::BLACK, Color32::WHITE);
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels.len(), 6);
        assert_eq!(image.pixels[5], Color32::WHITE);
        assert_eq!(image.pixels[0], Color32::BLACK);
    }

    #[test]
    fn colours_are_interpolated_per_channel() {
        let dead = Color32::from_rgb(40, 40, 40);
        let live = Color32::from_rgb(0, 200, 0);
        assert_eq!(blend(dead, live, 0.5), Color32::from_rgb(20, 120, 20));
    }
}
