//! Saved layout documents
//!
//! A saved layout is the editor's field list plus page size, stamped with the
//! time it was saved. Loading tolerates a missing `fields` array.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormForgeError;
use crate::layout::{FieldPlacement, Layout, PageSize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldPlacement>,
    pub page_size: PageSize,
    pub created_at: DateTime<Utc>,
}

impl SavedLayout {
    /// Stamp a layout with the current time
    pub fn new(name: Option<String>, layout: Layout) -> Self {
        Self::stamped(name, layout, Utc::now())
    }

    pub fn stamped(name: Option<String>, layout: Layout, created_at: DateTime<Utc>) -> Self {
        Self {
            name,
            fields: layout.fields,
            page_size: layout.page_size,
            created_at,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.page_size, self.fields.clone())
    }

    pub fn into_layout(self) -> Layout {
        Layout::new(self.page_size, self.fields)
    }

    pub fn to_json(&self) -> Result<String, FormForgeError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FormForgeError::SerializationError(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, FormForgeError> {
        serde_json::from_str(json).map_err(|e| FormForgeError::SerializationError(e.to_string()))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::layout::FieldKind;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = f64> {
        prop_oneof![0.0f64..5000.0, prop::num::f64::NORMAL]
    }

    proptest! {
        /// Property: saving and loading gives back every coordinate bit for bit
        #[test]
        fn saved_geometry_survives_json(
            x in coordinate(),
            y in coordinate(),
            width in coordinate(),
            height in coordinate(),
            page_width in coordinate(),
            page_height in coordinate(),
        ) {
            let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
            let layout = Layout::new(
                PageSize::new(page_width, page_height),
                vec![FieldPlacement::new("f", FieldKind::Text, x, y, width, height)],
            );
            let saved = SavedLayout::stamped(None, layout.clone(), created_at);

            let loaded = SavedLayout::from_json(&saved.to_json().unwrap()).unwrap();

            prop_assert_eq!(&loaded, &saved);
            prop_assert_eq!(loaded.into_layout(), layout);
        }
    }
}
