//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions for a width cap.
///
/// The width becomes `min(original_width, max_width)` and the height follows
/// the original aspect ratio, rounded to the nearest pixel. Images already
/// within the cap are returned unchanged; nothing is ever upscaled.
///
/// # Examples
/// ```
/// # use adorn_gallery::imaging::fit_to_width;
/// // 4000x3000 capped at 2000 → 2000x1500
/// assert_eq!(fit_to_width((4000, 3000), 2000), (2000, 1500));
///
/// // 800x600 is already narrower than the cap
/// assert_eq!(fit_to_width((800, 600), 2000), (800, 600));
/// ```
pub fn fit_to_width(original: (u32, u32), max_width: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;

    if orig_w <= max_width || orig_w == 0 {
        return original;
    }

    let ratio = max_width as f64 / orig_w as f64;
    // Extreme panoramas must not collapse to a zero-height image
    let height = ((orig_h as f64 * ratio).round() as u32).max(1);
    (max_width, height)
}
