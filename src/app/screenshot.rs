//! Viewport screenshots saved as PNG.

use std::path::Path;
use std::sync::Arc;

use eframe::egui;
use image::{Rgba, RgbaImage};

/// Copy an egui capture into an `image` buffer.
pub fn color_image_to_rgba(img: &egui::ColorImage) -> RgbaImage {
    let [w, h] = img.size;
    let mut out = RgbaImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let p = img.pixels[y * w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out
}

pub fn save_png(img: &egui::ColorImage, path: &Path) -> Result<(), image::ImageError> {
    color_image_to_rgba(img).save(path)
}

/// The screenshot delivered this frame, if any.
pub(super) fn take_screenshot_event(ctx: &egui::Context) -> Option<Arc<egui::ColorImage>> {
    ctx.input(|i| {
        i.events.iter().find_map(|e| {
            if let egui::Event::Screenshot { image, .. } = e {
                Some(image.clone())
            } else {
                None
            }
        })
    })
}

/// Ask where to save `img` and write it. Returns the status line to show.
pub(super) fn prompt_and_save(img: &egui::ColorImage) -> Option<String> {
    let default_name = format!("tradeview_{}.png", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let path = rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(&default_name)
        .save_file()?;
    match save_png(img, &path) {
        Ok(()) => {
            log::info!("saved screenshot to {:?}", path);
            Some(format!("Saved {}", path.display()))
        }
        Err(e) => {
            log::error!("failed to save screenshot: {}", e);
            Some(format!("Screenshot failed: {}", e))
        }
    }
}
