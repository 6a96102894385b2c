use std::fmt::{Display, Formatter};

/// Represents a value a visual property can take.
///
/// Keyframes, current property values and interpolated frames are all expressed as `Value`s.
/// - `Number` values interpolate arithmetically.
/// - `Text` values of the form `<number><unit>` (`"100px"`, `"45deg"`, `"50%"`) are numeric too:
///   their unit is kept on output.
/// - `Null` is a keyframe wildcard: it stands for "whatever the value was before".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

// **********************************************
// Extractors: get the value inside Value.
// **********************************************
impl Value {
    /// Builds a text value from a number and a unit (`Value::with_unit(10.0, "px")` is `"10px"`).
    pub fn with_unit<S: AsRef<str>>(number: f64, unit: S) -> Value {
        match unit.as_ref() {
            "" => Value::Number(number),
            unit => Value::Text(format!("{}{}", number, unit)),
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Value::Null
    }

    /// Indicates if the value can be interpolated arithmetically.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Extracts the numeric part of this value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Number(n) => Some(*n),
            Value::Text(s) => split_numeric(s).map(|(number, _)| number),
        }
    }

    /// Extracts the numeric part of this value, or 0.
    pub fn as_float(&self) -> f64 {
        self.as_number().unwrap_or_default()
    }

    /// Extracts the unit of a numeric text value (`"px"` for `"100px"`), if any.
    pub fn unit(&self) -> Option<&str> {
        match self {
            Value::Text(s) => match split_numeric(s) {
                Some((_, "")) | None => None,
                Some((_, unit)) => Some(unit),
            },
            _ => None,
        }
    }

    /// Extracts the string of this value.
    pub fn as_string(&self) -> String {
        match self {
            Value::Null => String::default(),
            _ => self.to_string(),
        }
    }
}

/// Splits a `<number><unit>` string into its numeric part and its unit.
///
/// The unit must be made of ascii letters or `%` only: `"rgb(0, 0, 0)"` is not numeric.
fn split_numeric(text: &str) -> Option<(f64, &str)> {
    let text = text.trim();
    let split = text
        .char_indices()
        .find(|&(index, c)| {
            !(c.is_ascii_digit() || c == '.' || (index == 0 && (c == '-' || c == '+')))
        })
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return None;
    }
    number.parse::<f64>().ok().map(|number| (number, unit))
}

// **********************************************
// Converters: set a value inside Value.
// **********************************************

macro_rules! impl_from_converter {
    ($variant:ident : $T:ty) => {
        impl From<$T> for Value {
            #[inline]
            fn from(val: $T) -> Value {
                Value::$variant(val.into())
            }
        }
    };
}

impl_from_converter!(Text: String);
impl_from_converter!(Text: &str);
impl_from_converter!(Number: u8);
impl_from_converter!(Number: u16);
impl_from_converter!(Number: u32);
impl_from_converter!(Number: i8);
impl_from_converter!(Number: i16);
impl_from_converter!(Number: i32);
impl_from_converter!(Number: f32);
impl_from_converter!(Number: f64);

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` is converted to the `Value::Null` wildcard.
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number() {
        assert_eq!(Value::Null.as_number(), None);
        assert_eq!(Value::Number(12.5).as_number(), Some(12.5));
        assert_eq!(Value::from("100px").as_number(), Some(100.0));
        assert_eq!(Value::from("-45.5deg").as_number(), Some(-45.5));
        assert_eq!(Value::from(" 50% ").as_number(), Some(50.0));
        assert_eq!(Value::from("0.3").as_number(), Some(0.3));
        assert_eq!(Value::from("rgb(0, 0, 0)").as_number(), None);
        assert_eq!(Value::from("auto").as_number(), None);
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("red").as_float(), 0.0);
    }

    #[test]
    fn test_unit() {
        assert_eq!(Value::from("100px").unit(), Some("px"));
        assert_eq!(Value::from("50%").unit(), Some("%"));
        assert_eq!(Value::from("12").unit(), None);
        assert_eq!(Value::Number(12.0).unit(), None);
        assert_eq!(Value::from("none").unit(), None);
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(Value::with_unit(10.0, "px"), Value::from("10px"));
        assert_eq!(Value::with_unit(0.5, "deg"), Value::from("0.5deg"));
        assert_eq!(Value::with_unit(3.0, ""), Value::Number(3.0));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42u8), Value::Number(42.0));
        assert_eq!(Value::from(-3i32), Value::Number(-3.0));
        assert_eq!(Value::from(String::from("auto")), Value::Text("auto".into()));
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some(2.0)), Value::Number(2.0));
        assert!(Value::from(None::<f64>).is_null());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Number(50.0).to_string(), "50");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::from("10px").to_string(), "10px");
        assert_eq!(Value::Null.as_string(), "");
    }
}
