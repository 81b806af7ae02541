use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// A named slot in the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Size,
    Toppings,
}

impl Field {
    /// Name used on the wire and by the validation schema.
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Size => "size",
            Field::Toppings => "toppings",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullName" => Ok(Field::FullName),
            "size" => Ok(Field::Size),
            "toppings" => Ok(Field::Toppings),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub fn code(self) -> &'static str {
        match self {
            Size::Small => "S",
            Size::Medium => "M",
            Size::Large => "L",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }

    pub fn from_code(code: &str) -> Option<Size> {
        Self::ALL.into_iter().find(|size| size.code() == code)
    }

    /// Next value of the size select, cycling through the empty placeholder.
    ///
    /// ```
    /// use bloom_pizza::domain::Size;
    ///
    /// assert_eq!(Size::cycle(""), "S");
    /// assert_eq!(Size::cycle("L"), "");
    /// ```
    pub fn cycle(current: &str) -> &'static str {
        match Self::from_code(current) {
            None => Size::Small.code(),
            Some(Size::Small) => Size::Medium.code(),
            Some(Size::Medium) => Size::Large.code(),
            Some(Size::Large) => "",
        }
    }

    /// Previous value of the size select.
    pub fn cycle_back(current: &str) -> &'static str {
        match Self::from_code(current) {
            None => Size::Large.code(),
            Some(Size::Large) => Size::Medium.code(),
            Some(Size::Medium) => Size::Small.code(),
            Some(Size::Small) => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topping {
    pub id: &'static str,
    pub text: &'static str,
}

/// The fixed list of selectable toppings.
pub static TOPPINGS: [Topping; 5] = [
    Topping { id: "1", text: "Pepperoni" },
    Topping { id: "2", text: "Green Peppers" },
    Topping { id: "3", text: "Pineapple" },
    Topping { id: "4", text: "Mushrooms" },
    Topping { id: "5", text: "Ham" },
];

pub fn find_topping(id: &str) -> Option<&'static Topping> {
    TOPPINGS.iter().find(|topping| topping.id == id)
}

/// Current values of the order form, shaped like the order request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub full_name: String,
    pub size: String,
    pub toppings: BTreeSet<String>,
}

impl FormValues {
    /// Returns the text value of `field`, or `None` for the topping set.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => Some(&self.full_name),
            Field::Size => Some(&self.size),
            Field::Toppings => None,
        }
    }

    pub fn has_topping(&self, id: &str) -> bool {
        self.toppings.contains(id)
    }
}

/// Inline error text per field. An empty string means the field has no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> &str {
        self.messages.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.messages.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.values().all(String::is_empty)
    }
}

/// Acknowledgment returned by the order endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in [Field::FullName, Field::Size, Field::Toppings] {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
        assert!("address".parse::<Field>().is_err());
    }

    #[test]
    fn test_size_cycle_visits_every_option() {
        let mut seen = vec![];
        let mut current = "";
        for _ in 0..4 {
            current = Size::cycle(current);
            seen.push(current);
        }
        assert_eq!(seen, vec!["S", "M", "L", ""]);
        assert_eq!(Size::cycle_back(""), "L");
        assert_eq!(Size::cycle_back("S"), "");
    }

    #[test]
    fn test_topping_catalog() {
        assert_eq!(TOPPINGS.len(), 5);
        assert_eq!(find_topping("3").map(|t| t.text), Some("Pineapple"));
        assert!(find_topping("6").is_none());
    }

    #[test]
    fn test_form_values_serialize_camel_case() {
        let values = FormValues {
            full_name: "Jane Doe".to_string(),
            size: "M".to_string(),
            toppings: ["3", "1"].iter().map(|s| s.to_string()).collect(),
        };
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fullName": "Jane Doe", "size": "M", "toppings": ["1", "3"]})
        );
    }

    #[test]
    fn test_field_errors_default_to_empty() {
        let mut errors = FieldErrors::default();
        assert_eq!(errors.get(Field::FullName), "");
        assert!(errors.is_empty());

        errors.set(Field::Size, "Size is required");
        assert_eq!(errors.get(Field::Size), "Size is required");
        assert!(!errors.is_empty());

        errors.clear(Field::Size);
        assert!(errors.is_empty());
    }
}
