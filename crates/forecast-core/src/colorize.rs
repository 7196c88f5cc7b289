//! Parameter-to-colormap selection and RGBA rasterization.

use renderer::gradient::{render_grid, Color};

/// Named colormaps the selection ladder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Rainbow,
    Jet,
    Hsv,
    Viridis,
    YlGnBu,
    Plasma,
    Twilight,
}

/// Pick a colormap by substring match against the parameter slug. Order
/// matters: the first matching keyword wins.
pub fn colormap_for_parameter(slug: &str) -> Colormap {
    const RAINBOW_KEYWORDS: &[&str] = &[
        "precipitation",
        "rain",
        "snow",
        "graupel",
        "mixing",
        "reflectivity",
    ];
    if RAINBOW_KEYWORDS.iter().any(|k| slug.contains(k)) {
        return Colormap::Rainbow;
    }
    if slug.contains("temperature") {
        return Colormap::Jet;
    }
    if slug.contains("direction") {
        return Colormap::Hsv;
    }
    if slug.contains("wind") {
        return Colormap::Viridis;
    }
    if slug.contains("humidity") {
        return Colormap::YlGnBu;
    }
    if slug.contains("pressure") || slug.contains("height") || slug.contains("vorticity") {
        return Colormap::Plasma;
    }
    if slug.contains("cloud") {
        return Colormap::Twilight;
    }
    Colormap::Viridis
}

/// Parameters whose near-zero band should be rendered fully transparent
/// instead of the colormap's near-zero color (avoids a wash of background
/// color over areas with no precipitation/cloud/etc).
pub fn is_zero_clip(slug: &str) -> bool {
    const ZERO_CLIP_KEYWORDS: &[&str] = &[
        "cloud",
        "precipitation",
        "rain",
        "snow",
        "graupel",
        "mixing",
        "reflectivity",
    ];
    ZERO_CLIP_KEYWORDS.iter().any(|k| slug.contains(k))
}

/// Normalized-value threshold below which a zero-clip parameter is rendered
/// fully transparent.
const ZERO_CLIP_THRESHOLD: f32 = 0.02;

fn lerp_stops(stops: &[(f32, [u8; 3])], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t >= t0 && t <= t1 {
            let span = (t1 - t0).max(1e-9);
            let frac = (t - t0) / span;
            return [
                (c0[0] as f32 + (c1[0] as f32 - c0[0] as f32) * frac) as u8,
                (c0[1] as f32 + (c1[1] as f32 - c0[1] as f32) * frac) as u8,
                (c0[2] as f32 + (c1[2] as f32 - c0[2] as f32) * frac) as u8,
            ];
        }
    }
    stops.last().unwrap().1
}

/// Hand-authored control points for each named colormap, sampled at `t` in
/// `[0, 1]`. There is no colormap crate anywhere in this workspace's
/// dependency graph, so these mirror well-known public colormaps (jet,
/// viridis, plasma, etc.) as small control-point tables, the same texture
/// as the gradient module's own `interpolate_color`.
fn sample_colormap(map: Colormap, t: f32) -> [u8; 3] {
    match map {
        Colormap::Jet => lerp_stops(
            &[
                (0.00, [0, 0, 143]),
                (0.125, [0, 0, 255]),
                (0.375, [0, 255, 255]),
                (0.625, [255, 255, 0]),
                (0.875, [255, 0, 0]),
                (1.00, [128, 0, 0]),
            ],
            t,
        ),
        Colormap::Viridis => lerp_stops(
            &[
                (0.00, [68, 1, 84]),
                (0.25, [59, 82, 139]),
                (0.50, [33, 145, 140]),
                (0.75, [94, 201, 98]),
                (1.00, [253, 231, 37]),
            ],
            t,
        ),
        Colormap::Plasma => lerp_stops(
            &[
                (0.00, [13, 8, 135]),
                (0.25, [126, 3, 168]),
                (0.50, [204, 71, 120]),
                (0.75, [248, 149, 64]),
                (1.00, [240, 249, 33]),
            ],
            t,
        ),
        Colormap::Twilight => lerp_stops(
            &[
                (0.00, [225, 217, 220]),
                (0.25, [110, 92, 154]),
                (0.50, [66, 41, 94]),
                (0.75, [136, 62, 98]),
                (1.00, [225, 217, 220]),
            ],
            t,
        ),
        Colormap::YlGnBu => lerp_stops(
            &[
                (0.00, [255, 255, 217]),
                (0.25, [161, 218, 180]),
                (0.50, [65, 182, 196]),
                (0.75, [34, 94, 168]),
                (1.00, [8, 29, 88]),
            ],
            t,
        ),
        Colormap::Rainbow => lerp_stops(
            &[
                (0.00, [110, 0, 220]),
                (0.20, [0, 0, 255]),
                (0.40, [0, 255, 255]),
                (0.60, [0, 255, 0]),
                (0.80, [255, 255, 0]),
                (1.00, [255, 0, 0]),
            ],
            t,
        ),
        Colormap::Hsv => {
            // Cylindrical hue sweep at full saturation/value.
            let h = t * 360.0;
            hsv_to_rgb(h, 1.0, 1.0)
        }
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = if (0.0..1.0).contains(&hp) {
        (c, x, 0.0)
    } else if (1.0..2.0).contains(&hp) {
        (x, c, 0.0)
    } else if (2.0..3.0).contains(&hp) {
        (0.0, c, x)
    } else if (3.0..4.0).contains(&hp) {
        (0.0, x, c)
    } else if (4.0..5.0).contains(&hp) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };
    let m = v - c;
    [
        ((r1 + m) * 255.0) as u8,
        ((g1 + m) * 255.0) as u8,
        ((b1 + m) * 255.0) as u8,
    ]
}

/// Render a grid of values (row-major, NaN for missing) into an RGBA
/// raster, normalized against `(gmin, gmax)` and colorized per
/// `parameter_slug`'s colormap, with the zero-clip alpha policy applied
/// where it names the parameter.
pub fn colorize_grid(
    data: &[f32],
    width: usize,
    height: usize,
    gmin: f32,
    gmax: f32,
    parameter_slug: &str,
) -> Vec<u8> {
    let map = colormap_for_parameter(parameter_slug);
    let zero_clip = is_zero_clip(parameter_slug);

    render_grid(data, width, height, gmin, gmax, move |normalized| {
        let [r, g, b] = sample_colormap(map, normalized);
        let alpha = if zero_clip && normalized < ZERO_CLIP_THRESHOLD {
            0
        } else {
            255
        };
        Color::new(r, g, b, alpha)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colormap_ladder_matches_keywords() {
        assert_eq!(colormap_for_parameter("precipitation-rate"), Colormap::Rainbow);
        assert_eq!(colormap_for_parameter("temperature-2-m"), Colormap::Jet);
        assert_eq!(colormap_for_parameter("wind-direction"), Colormap::Hsv);
        assert_eq!(colormap_for_parameter("u-component-of-wind"), Colormap::Viridis);
        assert_eq!(colormap_for_parameter("relative-humidity"), Colormap::YlGnBu);
        assert_eq!(colormap_for_parameter("pressure-reduced-to-msl"), Colormap::Plasma);
        assert_eq!(colormap_for_parameter("total-cloud-cover"), Colormap::Twilight);
        assert_eq!(colormap_for_parameter("unknown-thing"), Colormap::Viridis);
    }

    #[test]
    fn zero_clip_keywords() {
        assert!(is_zero_clip("precipitation-rate"));
        assert!(is_zero_clip("total-cloud-cover"));
        assert!(!is_zero_clip("temperature-2-m"));
    }

    #[test]
    fn missing_values_are_transparent() {
        let data = [f32::NAN, 5.0, 5.0, 5.0];
        let rgba = colorize_grid(&data, 2, 2, 0.0, 10.0, "temperature-2-m");
        assert_eq!(rgba[3], 0);
    }

    #[test]
    fn zero_clip_parameter_hides_near_zero_band() {
        let data = [0.0f32, 10.0];
        let rgba = colorize_grid(&data, 2, 1, 0.0, 10.0, "precipitation-rate");
        assert_eq!(rgba[3], 0);
        assert_eq!(rgba[7], 255);
    }
}
