//! Composable transform properties: each one lives in its own custom property and the target
//! `transform` combines them.

use crate::utils::Value;

/// The composable transform functions.
const TRANSFORMS: [&str; 4] = ["translate", "scale", "rotate", "skew"];
/// The axes each transform function exists for.
const AXES: [&str; 4] = ["", "X", "Y", "Z"];

/// Describes a composable transform property (see [`definition`]).
#[derive(Clone, Debug, PartialEq)]
pub struct TransformDefinition {
    /// The custom property value syntax.
    pub syntax: &'static str,
    pub initial_value: Value,
    /// The unit given to unitless numbers.
    pub unit: &'static str,
}

/// Resolves a shorthand property name: `x`, `y`, `z` stand for `translateX/Y/Z`.
pub fn resolve_alias(name: &str) -> &str {
    match name {
        "x" => "translateX",
        "y" => "translateY",
        "z" => "translateZ",
        name => name,
    }
}

/// Splits a composable property name into its transform function and its axis.
fn split(name: &str) -> Option<(&'static str, &'static str)> {
    TRANSFORMS.iter().find_map(|transform| {
        let axis = name.strip_prefix(transform)?;
        AXES.iter()
            .find(|candidate| **candidate == axis)
            .map(|axis| (*transform, *axis))
    })
}

/// Indicates if a (resolved) property name is a composable transform (`scale`, `rotateX`...).
pub fn is_composable(name: &str) -> bool {
    split(name).is_some()
}

/// Indicates if a property name is a custom property (`--my-property`).
pub fn is_custom(name: &str) -> bool {
    name.starts_with("--")
}

/// Returns the custom property holding a composable transform value (`--motion-scale`).
pub fn custom_name(name: &str) -> String {
    format!("--motion-{}", name)
}

/// Returns the definition of a composable transform, if the name is one.
pub fn definition(name: &str) -> Option<TransformDefinition> {
    let (transform, _) = split(name)?;
    let definition = match transform {
        "translate" => TransformDefinition {
            syntax: "<length-percentage>",
            initial_value: Value::from("0px"),
            unit: "px",
        },
        "rotate" | "skew" => TransformDefinition {
            syntax: "<angle>",
            initial_value: Value::from("0deg"),
            unit: "deg",
        },
        _ => TransformDefinition {
            syntax: "<number>",
            initial_value: Value::from(1),
            unit: "",
        },
    };
    Some(definition)
}

/// Renders the `transform` value combining the given composable transforms, in order.
pub fn render(transforms: &[String]) -> String {
    transforms
        .iter()
        .map(|name| format!("{}(var({}))", name, custom_name(name)))
        .collect::<Vec<_>>()
        .join(" ")
}
