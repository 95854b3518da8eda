use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create payload: every column except `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    #[serde(default)]
    pub has_sockets: bool,
    pub can_take_calls: bool,
    #[serde(default)]
    pub coffee_price: Option<String>,
}

/// Sparse update. `None` leaves the column untouched; for `coffee_price`, `Some(None)`
/// clears it (JSON `null`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CafePatch {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: Option<bool>,
    pub has_wifi: Option<bool>,
    pub has_sockets: Option<bool>,
    pub can_take_calls: Option<bool>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub coffee_price: Option<Option<String>>,
}

fn present_or_null<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub fn validate_url(field: &str, value: &str) -> Result<(), errors::ModelError> {
    validate_required(field, value)?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(errors::ModelError::Validation(format!("{field} must start with http(s)")));
    }
    Ok(())
}

impl NewCafe {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_required("name", &self.name)?;
        validate_url("map_url", &self.map_url)?;
        validate_url("img_url", &self.img_url)?;
        validate_required("location", &self.location)?;
        validate_required("seats", &self.seats)?;
        Ok(())
    }

    /// Active model with `id` left unset so the store assigns it.
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name.trim().to_string()),
            map_url: Set(self.map_url),
            img_url: Set(self.img_url),
            location: Set(self.location.trim().to_string()),
            seats: Set(self.seats),
            has_toilet: Set(self.has_toilet),
            has_wifi: Set(self.has_wifi),
            has_sockets: Set(self.has_sockets),
            can_take_calls: Set(self.can_take_calls),
            coffee_price: Set(self.coffee_price),
            ..Default::default()
        }
    }
}

impl CafePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if let Some(v) = &self.name { validate_required("name", v)?; }
        if let Some(v) = &self.map_url { validate_url("map_url", v)?; }
        if let Some(v) = &self.img_url { validate_url("img_url", v)?; }
        if let Some(v) = &self.location { validate_required("location", v)?; }
        if let Some(v) = &self.seats { validate_required("seats", v)?; }
        Ok(())
    }

    /// Overwrite only the supplied columns.
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(v) = self.name { am.name = Set(v.trim().to_string()); }
        if let Some(v) = self.map_url { am.map_url = Set(v); }
        if let Some(v) = self.img_url { am.img_url = Set(v); }
        if let Some(v) = self.location { am.location = Set(v.trim().to_string()); }
        if let Some(v) = self.seats { am.seats = Set(v); }
        if let Some(v) = self.has_toilet { am.has_toilet = Set(v); }
        if let Some(v) = self.has_wifi { am.has_wifi = Set(v); }
        if let Some(v) = self.has_sockets { am.has_sockets = Set(v); }
        if let Some(v) = self.can_take_calls { am.can_take_calls = Set(v); }
        if let Some(v) = self.coffee_price { am.coffee_price = Set(v); }
    }
}
