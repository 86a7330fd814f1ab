//! SVG composition of a scene.
//!
//! Builds the intermediate SVG the rasterizer consumes, in one synchronous
//! pass: background color, background bitmap, grid overlay, then elements
//! in paint order with rotation, rounded clipping, text styling, and the
//! selection outline.

use std::fmt::Write;

use thumbsmith_core::{Element, ElementKind, Scene, TextAlign};

use crate::cache::ImageCache;
use crate::error::RenderResult;
use crate::RenderConfig;

/// Selection outline color.
const OUTLINE_COLOR: &str = "#fdb92b";

/// Filter id for the text drop shadow.
const SHADOW_FILTER_ID: &str = "text-shadow";

/// Compose the scene into an SVG document string.
pub(crate) fn compose_svg(
    scene: &Scene,
    config: &RenderConfig,
    cache: &mut ImageCache,
) -> RenderResult<String> {
    let width = scene.width;
    let height = scene.height;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );

    if scene
        .elements()
        .iter()
        .any(|e| matches!(&e.kind, ElementKind::Text { shadow: true, .. }))
    {
        let _ = write!(
            svg,
            "<defs><filter id=\"{SHADOW_FILTER_ID}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
             <feDropShadow dx=\"3\" dy=\"3\" stdDeviation=\"3\" flood-color=\"#000\" flood-opacity=\"0.8\"/>\
             </filter></defs>",
        );
    }

    // Background color
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&config.background_color),
    );

    // Background bitmap, stretched to the canvas
    if let Some(src) = &scene.background {
        let href = cache.resolve(src)?;
        let _ = write!(
            svg,
            "<image x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" preserveAspectRatio=\"none\" href=\"{}\"/>",
            escape_xml(&href),
        );
    }

    if config.show_grid {
        render_grid_svg(&mut svg, width, height);
    }

    let mut clip_counter = 0usize;
    for index in scene.paint_order() {
        let element = &scene.elements()[index];
        let selected = scene.selected() == Some(index);
        render_element_svg(&mut svg, element, selected, cache, &mut clip_counter)?;
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Dashed center cross for alignment.
fn render_grid_svg(svg: &mut String, width: f32, height: f32) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let _ = write!(
        svg,
        "<g stroke=\"#fff\" stroke-opacity=\"0.27\" stroke-dasharray=\"8 4\">\
         <line x1=\"{cx}\" y1=\"0\" x2=\"{cx}\" y2=\"{height}\"/>\
         <line x1=\"0\" y1=\"{cy}\" x2=\"{width}\" y2=\"{cy}\"/>\
         </g>",
    );
}

/// Render a single element into the SVG, rotated about its center.
fn render_element_svg(
    svg: &mut String,
    element: &Element,
    selected: bool,
    cache: &mut ImageCache,
    clip_counter: &mut usize,
) -> RenderResult<()> {
    let t = &element.transform;
    let left = -t.width / 2.0;
    let top = -t.height / 2.0;

    let _ = write!(
        svg,
        "<g transform=\"translate({} {}) rotate({})\">",
        t.x, t.y, t.rotation,
    );

    match &element.kind {
        ElementKind::Image { src, .. } => {
            let href = escape_xml(&cache.resolve(src)?);
            if t.corner_radius > 0.0 {
                *clip_counter += 1;
                let clip_id = format!("clip{clip_counter}");
                let _ = write!(
                    svg,
                    "<clipPath id=\"{clip_id}\"><rect x=\"{left}\" y=\"{top}\" width=\"{}\" height=\"{}\" rx=\"{}\"/></clipPath>",
                    t.width, t.height, t.corner_radius,
                );
                let _ = write!(
                    svg,
                    "<image x=\"{left}\" y=\"{top}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" clip-path=\"url(#{clip_id})\" href=\"{href}\"/>",
                    t.width, t.height,
                );
            } else {
                let _ = write!(
                    svg,
                    "<image x=\"{left}\" y=\"{top}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" href=\"{href}\"/>",
                    t.width, t.height,
                );
            }
        }

        ElementKind::Text {
            content,
            font_family,
            font_size,
            color,
            align,
            stroke,
            shadow,
            background,
        } => {
            if let Some(bg) = background {
                let _ = write!(
                    svg,
                    "<rect x=\"{left}\" y=\"{top}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                    t.width,
                    t.height,
                    escape_xml(bg),
                );
            }

            let anchor = match align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
                TextAlign::Right => "end",
            };
            let _ = write!(
                svg,
                "<text x=\"0\" y=\"0\" font-family=\"{}, sans-serif\" font-size=\"{font_size}\" font-weight=\"bold\" text-anchor=\"{anchor}\" dominant-baseline=\"central\" fill=\"{}\"",
                escape_xml(font_family),
                escape_xml(color),
            );
            if *stroke {
                svg.push_str(" stroke=\"#000\" stroke-width=\"5\" paint-order=\"stroke\"");
            }
            if *shadow {
                let _ = write!(svg, " filter=\"url(#{SHADOW_FILTER_ID})\"");
            }
            let _ = write!(svg, ">{}</text>", escape_xml(content));
        }
    }

    if selected {
        let _ = write!(
            svg,
            "<rect x=\"{left}\" y=\"{top}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{OUTLINE_COLOR}\" stroke-width=\"2\" stroke-dasharray=\"8 5\"/>",
            t.width, t.height,
        );
    }

    svg.push_str("</g>");
    Ok(())
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use thumbsmith_core::{Editor, ImageAsset, ImageFormat};

    const RED_DOT_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    fn compose(scene: &Scene, config: &RenderConfig) -> String {
        let mut cache = ImageCache::new();
        compose_svg(scene, config, &mut cache).expect("compose")
    }

    #[test]
    fn test_empty_scene_background_only() {
        let scene = Scene::new(800.0, 600.0);
        let config = RenderConfig {
            background_color: "#123456".to_string(),
            ..RenderConfig::default()
        };
        let svg = compose(&scene, &config);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("fill=\"#123456\""));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn test_grid_lines_when_enabled() {
        let scene = Scene::new(800.0, 600.0);
        let config = RenderConfig {
            show_grid: true,
            ..RenderConfig::default()
        };
        let svg = compose(&scene, &config);
        assert!(svg.contains("x1=\"400\""));
        assert!(svg.contains("y1=\"300\""));
        assert!(svg.contains("stroke-dasharray=\"8 4\""));
    }

    #[test]
    fn test_background_image_stretched() {
        let mut scene = Scene::new(800.0, 600.0);
        scene.background = Some(RED_DOT_URI.to_string());
        let svg = compose(&scene, &RenderConfig::default());
        assert!(svg.contains("preserveAspectRatio=\"none\""));
        assert!(svg.contains("width=\"800\" height=\"600\""));
    }

    #[test]
    fn test_text_styling_attributes() {
        let mut editor = Editor::new(800.0, 600.0);
        let index = editor.add_text_with("A < B");
        editor.select(index);
        editor.set_stroke(true);
        editor.set_shadow(true);

        let svg = compose(editor.scene(), &RenderConfig::default());
        assert!(svg.contains("A &lt; B"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("paint-order=\"stroke\""));
        assert!(svg.contains("filter=\"url(#text-shadow)\""));
        assert!(svg.contains("<feDropShadow"));
        // Selected element carries the dashed outline
        assert!(svg.contains("stroke-dasharray=\"8 5\""));
        assert!(svg.contains(OUTLINE_COLOR));
    }

    #[test]
    fn test_rotation_transform_emitted() {
        let mut editor = Editor::new(800.0, 600.0);
        let index = editor.add_text();
        editor.select(index);
        editor.set_rotation(-12.0);

        let svg = compose(editor.scene(), &RenderConfig::default());
        assert!(svg.contains("rotate(-12)"));
    }

    #[test]
    fn test_rounded_image_gets_clip_path() {
        let mut scene = Scene::new(800.0, 600.0);
        let element = thumbsmith_core::Element::new(ElementKind::Image {
            src: RED_DOT_URI.to_string(),
            format: ImageFormat::Png,
        })
        .with_transform(thumbsmith_core::Transform {
            x: 400.0,
            y: 300.0,
            width: 200.0,
            height: 140.0,
            rotation: 0.0,
            layer: 0,
            corner_radius: 16.0,
        });
        scene.add_element(element);

        let svg = compose(&scene, &RenderConfig::default());
        assert!(svg.contains("<clipPath id=\"clip1\">"));
        assert!(svg.contains("rx=\"16\""));
        assert!(svg.contains("clip-path=\"url(#clip1)\""));
    }

    #[test]
    fn test_flat_image_has_no_clip_path() {
        let mut editor = Editor::new(800.0, 600.0);
        editor.add_image(ImageAsset::new(RED_DOT_URI, ImageFormat::Png, 50.0, 50.0));
        let svg = compose(editor.scene(), &RenderConfig::default());
        assert!(!svg.contains("clipPath"));
    }

    #[test]
    fn test_no_outline_without_selection() {
        let mut editor = Editor::new(800.0, 600.0);
        editor.add_text();
        let svg = compose(editor.scene(), &RenderConfig::default());
        assert!(!svg.contains(OUTLINE_COLOR));
    }
}
