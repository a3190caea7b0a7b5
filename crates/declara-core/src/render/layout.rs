use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::DeclaraError;

/// Sparse coordinate overrides keyed by [`Layout`] field name.
pub type LayoutOverrides = BTreeMap<String, f32>;

/// Draw positions on the A4 declaration template, in PDF points with the
/// origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub sender_name_x: f32,
    pub sender_name_y: f32,
    pub sender_address_x: f32,
    pub sender_address_y: f32,
    /// Right edge of the sender address field; wider text wraps.
    pub sender_address_limit_x: f32,
    pub sender_address_return_x: f32,
    pub sender_address_return_y: f32,
    pub sender_city_x: f32,
    pub sender_city_y: f32,
    pub sender_state_x: f32,
    pub sender_state_y: f32,
    pub sender_postal_code_x: f32,
    pub sender_postal_code_y: f32,

    pub recipient_name_x: f32,
    pub recipient_name_y: f32,
    pub recipient_address_x: f32,
    pub recipient_address_y: f32,
    pub recipient_address_limit_x: f32,
    pub recipient_address_return_x: f32,
    pub recipient_address_return_y: f32,
    pub recipient_city_x: f32,
    pub recipient_city_y: f32,
    pub recipient_state_x: f32,
    pub recipient_state_y: f32,
    pub recipient_postal_code_x: f32,
    pub recipient_postal_code_y: f32,

    pub items_top_y: f32,
    pub items_row_height: f32,
    pub item_description_x: f32,
    pub item_quantity_x: f32,
    pub item_description_x_2: f32,
    pub item_quantity_x_2: f32,
    pub separator_description_x: f32,
    pub separator_quantity_x: f32,

    pub weight_x: f32,
    pub weight_y: f32,
    pub date_y: f32,
    pub date_city_x: f32,
    pub date_day_x: f32,
    pub date_month_x: f32,
    pub date_year_x: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            sender_name_x: 45.0,
            sender_name_y: 726.0,
            sender_address_x: 63.0,
            sender_address_y: 709.0,
            sender_address_limit_x: 280.0,
            sender_address_return_x: 17.0,
            sender_address_return_y: 692.0,
            sender_city_x: 50.0,
            sender_city_y: 673.0,
            sender_state_x: 245.0,
            sender_state_y: 673.0,
            sender_postal_code_x: 35.0,
            sender_postal_code_y: 655.0,

            recipient_name_x: 325.0,
            recipient_name_y: 726.0,
            recipient_address_x: 343.0,
            recipient_address_y: 709.0,
            recipient_address_limit_x: 570.0,
            recipient_address_return_x: 297.0,
            recipient_address_return_y: 692.0,
            recipient_city_x: 330.0,
            recipient_city_y: 673.0,
            recipient_state_x: 540.0,
            recipient_state_y: 673.0,
            recipient_postal_code_x: 325.0,
            recipient_postal_code_y: 655.0,

            items_top_y: 600.0,
            items_row_height: 17.0,
            item_description_x: 60.0,
            item_quantity_x: 405.0,
            item_description_x_2: 230.0,
            item_quantity_x_2: 450.0,
            separator_description_x: 220.0,
            separator_quantity_x: 430.0,

            weight_x: 395.0,
            weight_y: 327.0,
            date_y: 190.0,
            date_city_x: 50.0,
            date_day_x: 145.0,
            date_month_x: 215.0,
            date_year_x: 325.0,
        }
    }
}

impl Layout {
    /// Apply sparse overrides on top of this layout.
    ///
    /// Keys that name no layout field are ignored with a warning.
    pub fn with_overrides(&self, overrides: &LayoutOverrides) -> Result<Layout, DeclaraError> {
        let mut value = serde_json::to_value(self)?;
        if let Some(fields) = value.as_object_mut() {
            for (key, coordinate) in overrides {
                match fields.get_mut(key) {
                    Some(slot) => *slot = serde_json::Value::from(*coordinate),
                    None => tracing::warn!(key = %key, "ignoring unknown layout override"),
                }
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// The default layout with overrides from a JSON file merged on top.
    pub fn from_overrides_file(path: &Path) -> Result<Layout, DeclaraError> {
        let overrides = load_overrides(path)?;
        Layout::default().with_overrides(&overrides)
    }
}

/// Load a JSON object of `field -> coordinate` overrides.
pub fn load_overrides(path: &Path) -> Result<LayoutOverrides, DeclaraError> {
    let content = std::fs::read_to_string(path).map_err(|e| DeclaraError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| DeclaraError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_replace_only_named_fields() {
        let overrides = LayoutOverrides::from([
            ("weight_x".to_string(), 400.0),
            ("items_top_y".to_string(), 590.5),
        ]);
        let layout = Layout::default().with_overrides(&overrides).unwrap();
        assert_eq!(layout.weight_x, 400.0);
        assert_eq!(layout.items_top_y, 590.5);
        assert_eq!(layout.weight_y, 327.0);
        assert_eq!(layout.sender_name_x, 45.0);
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let overrides = LayoutOverrides::from([("margin_left".to_string(), 10.0)]);
        let layout = Layout::default().with_overrides(&overrides).unwrap();
        assert_eq!(layout, Layout::default());
    }

    #[test]
    fn test_load_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"date_y": 200, "recipient_state_x": 535.5}}"#).unwrap();
        let layout = Layout::from_overrides_file(file.path()).unwrap();
        assert_eq!(layout.date_y, 200.0);
        assert_eq!(layout.recipient_state_x, 535.5);
    }

    #[test]
    fn test_load_overrides_rejects_non_numeric() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"date_y": "low"}}"#).unwrap();
        let err = load_overrides(file.path()).unwrap_err();
        assert!(matches!(err, DeclaraError::LayoutLoad { .. }));
    }
}
