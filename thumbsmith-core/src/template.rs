//! Built-in composition templates.
//!
//! Each template is a ready-made element arrangement sized for the default
//! 1280x720 canvas. Applying one replaces the scene's element list.

use crate::{Element, ElementKind, TextAlign, Transform};

/// A named, ready-made arrangement of elements.
#[derive(Debug, Clone)]
pub struct Template {
    /// Display name.
    pub name: &'static str,
    /// Elements to install, already layered.
    pub elements: Vec<Element>,
}

/// The built-in template set.
#[must_use]
pub fn builtin_templates() -> Vec<Template> {
    vec![gaming(), vlog(), education()]
}

/// Look up a built-in template by name.
#[must_use]
pub fn builtin_template(name: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.name == name)
}

#[allow(clippy::too_many_arguments)]
fn text(
    content: &str,
    x: f32,
    y: f32,
    font_family: &str,
    font_size: f32,
    color: &str,
    align: TextAlign,
    stroke: bool,
    shadow: bool,
    rotation: f32,
    width: f32,
    height: f32,
    layer: i32,
    corner_radius: f32,
) -> Element {
    Element::new(ElementKind::Text {
        content: content.to_string(),
        font_family: font_family.to_string(),
        font_size,
        color: color.to_string(),
        align,
        stroke,
        shadow,
        background: None,
    })
    .with_transform(Transform {
        x,
        y,
        width,
        height,
        rotation,
        layer,
        corner_radius,
    })
}

fn gaming() -> Template {
    Template {
        name: "Gaming",
        elements: vec![
            text(
                "Epic Gameplay!",
                640.0,
                640.0,
                "Bangers",
                130.0,
                "#fff",
                TextAlign::Center,
                true,
                true,
                0.0,
                900.0,
                160.0,
                1,
                0.0,
            ),
            text(
                "Subscribe \u{27a1}\u{fe0f}",
                160.0,
                120.0,
                "Oswald",
                64.0,
                "#fdb92b",
                TextAlign::Left,
                true,
                true,
                -12.0,
                400.0,
                80.0,
                2,
                14.0,
            ),
        ],
    }
}

fn vlog() -> Template {
    Template {
        name: "Vlog",
        elements: vec![
            text(
                "A Day in My Life",
                640.0,
                220.0,
                "Merriweather",
                93.0,
                "#fff",
                TextAlign::Center,
                true,
                true,
                0.0,
                640.0,
                110.0,
                1,
                7.0,
            ),
            text(
                "New Video",
                1050.0,
                680.0,
                "Roboto",
                56.0,
                "#fdb92b",
                TextAlign::Right,
                true,
                false,
                6.0,
                400.0,
                64.0,
                2,
                12.0,
            ),
        ],
    }
}

fn education() -> Template {
    Template {
        name: "Education",
        elements: vec![text(
            "Learn Coding!",
            890.0,
            224.0,
            "Oswald",
            89.0,
            "#3afe42",
            TextAlign::Right,
            true,
            true,
            0.0,
            740.0,
            96.0,
            1,
            0.0,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_set() {
        let templates = builtin_templates();
        let names: Vec<_> = templates.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Gaming", "Vlog", "Education"]);
        assert!(templates.iter().all(|t| !t.elements.is_empty()));
    }

    #[test]
    fn test_lookup_by_name() {
        let template = builtin_template("Vlog").expect("Vlog exists");
        assert_eq!(template.elements.len(), 2);
        assert!(builtin_template("Nope").is_none());
    }

    #[test]
    fn test_templates_are_text_only() {
        for template in builtin_templates() {
            assert!(template.elements.iter().all(Element::is_text));
        }
    }
}
