// kernel_image.rs - Decodes kernel weight matrices from image files

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use life_engine::{Kernel, KernelSpec};
use tracing::info;

/// Reads an image and turns its pixel intensities into a kernel spec.
pub fn load(path: &Path) -> Result<KernelSpec> {
    let image = image::open(path).with_context(|| format!("decoding kernel image {}", path.display()))?;
    let kernel = from_image(&image).with_context(|| format!("kernel image {}", path.display()))?;
    info!(
        path = %path.display(),
        width = kernel.width(),
        height = kernel.height(),
        max_value = kernel.max_value(),
        "loaded kernel"
    );
    Ok(KernelSpec::from(&kernel))
}

pub fn from_image(image: &DynamicImage) -> Result<Kernel> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels: Vec<[u8; 3]> = rgb.pixels().map(|p| p.0).collect();
    Ok(Kernel::from_rgb(width as usize, height as usize, &pixels)?)
}
