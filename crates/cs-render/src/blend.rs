//! Compositing operators on straight-alpha colors.
//!
//! Both operators follow the usual separable blend model: the source color
//! is first mixed with the backdrop through a blend function, then
//! source-over composited onto it. [`over`] uses the identity blend
//! function, [`screen`] uses `b + s - b·s`.

use cs_core::Rgba;

/// Composites `src` over `dst`.
///
/// # Examples
///
/// ```
/// use cs_core::Rgba;
/// use cs_render::blend::over;
///
/// let half_white = Rgba::WHITE.with_alpha(0.5);
/// let out = over(half_white, Rgba::BLACK);
/// assert!((out.red - 0.5).abs() < 1e-12);
/// assert_eq!(out.alpha, 1.0);
/// ```
#[must_use]
pub fn over(src: Rgba, dst: Rgba) -> Rgba {
    composite(src, dst, |_backdrop, source| source)
}

/// Composites `src` onto `dst` with the screen blend mode.
///
/// Screen never darkens the backdrop, so a highlight drawn this way only
/// ever brightens the glyphs beneath it.
///
/// # Examples
///
/// ```
/// use cs_core::Rgba;
/// use cs_render::blend::screen;
///
/// let grey = Rgba::new(0.5, 0.5, 0.5, 1.0);
/// let out = screen(grey, grey);
/// assert!((out.red - 0.75).abs() < 1e-12);
/// ```
#[must_use]
pub fn screen(src: Rgba, dst: Rgba) -> Rgba {
    composite(src, dst, |backdrop, source| {
        backdrop + source - backdrop * source
    })
}

fn composite(src: Rgba, dst: Rgba, blend: impl Fn(f64, f64) -> f64) -> Rgba {
    let src_alpha = src.alpha.clamp(0.0, 1.0);
    let dst_alpha = dst.alpha.clamp(0.0, 1.0);
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba::TRANSPARENT;
    }

    let channel = |source: f64, backdrop: f64| {
        let mixed = (1.0 - dst_alpha) * source + dst_alpha * blend(backdrop, source);
        let premultiplied = src_alpha * mixed + dst_alpha * backdrop * (1.0 - src_alpha);
        (premultiplied / out_alpha).clamp(0.0, 1.0)
    };

    Rgba::new(
        channel(src.red, dst.red),
        channel(src.green, dst.green),
        channel(src.blue, dst.blue),
        out_alpha,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.red - b.red).abs() < 1e-9
            && (a.green - b.green).abs() < 1e-9
            && (a.blue - b.blue).abs() < 1e-9
            && (a.alpha - b.alpha).abs() < 1e-9
    }

    #[test]
    fn test_transparent_source_leaves_backdrop() {
        let backdrop = Rgba::new(0.2, 0.4, 0.6, 1.0);
        assert!(close(over(Rgba::TRANSPARENT, backdrop), backdrop));
        assert!(close(screen(Rgba::TRANSPARENT, backdrop), backdrop));
    }

    #[test]
    fn test_opaque_over_replaces_backdrop() {
        let src = Rgba::new(0.9, 0.1, 0.3, 1.0);
        assert!(close(over(src, Rgba::BLACK), src));
    }

    #[test]
    fn test_over_transparent_backdrop_keeps_source() {
        let src = Rgba::new(0.9, 0.1, 0.3, 0.4);
        assert!(close(over(src, Rgba::TRANSPARENT), src));
    }

    #[test]
    fn test_screen_never_darkens() {
        let backdrop = Rgba::new(0.78, 0.83, 1.0, 1.0);
        for step in 0..=10 {
            let alpha = f64::from(step) / 10.0;
            let out = screen(Rgba::WHITE.with_alpha(alpha), backdrop);
            assert!(out.red >= backdrop.red - 1e-12);
            assert!(out.green >= backdrop.green - 1e-12);
            assert!(out.blue >= backdrop.blue - 1e-12);
        }
    }

    #[test]
    fn test_screen_white_saturates() {
        let backdrop = Rgba::new(0.3, 0.5, 0.7, 1.0);
        assert!(close(screen(Rgba::WHITE, backdrop), Rgba::WHITE));
    }

    #[test]
    fn test_both_transparent() {
        assert_eq!(over(Rgba::TRANSPARENT, Rgba::TRANSPARENT), Rgba::TRANSPARENT);
    }
}
