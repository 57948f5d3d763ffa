//! Saved screens and the query payload they embed.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::codec::{self, wire_serde, Field, Record};
use crate::errors::Result;
use crate::models::entitlements::Entitlements;
use crate::models::filters::AssetScreenerCreditRequestFilters;

// ============================================================================
// ScreenerQueryBuilder
// ============================================================================

/// Query payload of a screen.
///
/// `assetClass` and `type` are fixed per record type and always written;
/// they are not stored on the instance and cannot be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScreenerQueryBuilder {
    pub filters: Option<AssetScreenerCreditRequestFilters>,
    pub name: Option<String>,
}

impl ScreenerQueryBuilder {
    pub const ASSET_CLASS: &'static str = "Credit";
    pub const TYPE: &'static str = "Bond";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_filters(mut self, filters: AssetScreenerCreditRequestFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn asset_class(&self) -> &'static str {
        Self::ASSET_CLASS
    }

    pub fn type_(&self) -> &'static str {
        Self::TYPE
    }
}

impl Record for ScreenerQueryBuilder {
    const RECORD: &'static str = "ScreenerQueryBuilder";
    const FIELDS: &'static [Field] = &[
        Field::optional("filters"),
        Field::constant("asset_class", Self::ASSET_CLASS),
        Field::constant("type_", Self::TYPE).rename("type").omit_if_absent(),
        Field::optional("name"),
    ];

    fn get(&self, field: &Field) -> Result<Value> {
        match field.name {
            "filters" => codec::opt_record(&self.filters),
            "name" => Ok(codec::opt_string(&self.name)),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        match field.name {
            "filters" => self.filters = Some(codec::as_record(Self::RECORD, field, value)?),
            "name" => self.name = Some(codec::as_string(Self::RECORD, field, value)?),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

// ============================================================================
// Screen
// ============================================================================

/// A saved, named credit-bond screen.
///
/// `name` and `query_builder` are required by the service but default on
/// construction; an unset `name` is written as `null`. Every other field is
/// dropped from the wire form when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Screen {
    pub name: Option<String>,
    pub query_builder: ScreenerQueryBuilder,
    pub id: Option<String>,
    pub active: Option<bool>,
    pub owner_id: Option<String>,
    pub created_by_id: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub last_updated_by_id: Option<String>,
    pub last_updated_time: Option<DateTime<Utc>>,
    pub entitlements: Option<Entitlements>,
}

impl Screen {
    pub fn new(name: impl Into<String>, query_builder: ScreenerQueryBuilder) -> Self {
        Self {
            name: Some(name.into()),
            query_builder,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Sets creator and creation time together, as the service stamps them.
    pub fn with_created(mut self, by_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.created_by_id = Some(by_id.into());
        self.created_time = Some(at);
        self
    }

    pub fn with_last_updated(mut self, by_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.last_updated_by_id = Some(by_id.into());
        self.last_updated_time = Some(at);
        self
    }

    pub fn with_entitlements(mut self, entitlements: Entitlements) -> Self {
        self.entitlements = Some(entitlements);
        self
    }
}

impl Record for Screen {
    const RECORD: &'static str = "Screen";
    const FIELDS: &'static [Field] = &[
        Field::required("name"),
        Field::required("query_builder"),
        Field::optional("id_").rename("id"),
        Field::optional("active"),
        Field::optional("owner_id"),
        Field::optional("created_by_id"),
        Field::optional("created_time"),
        Field::optional("last_updated_by_id"),
        Field::optional("last_updated_time"),
        Field::optional("entitlements"),
    ];

    fn get(&self, field: &Field) -> Result<Value> {
        match field.name {
            "name" => Ok(codec::opt_string(&self.name)),
            "query_builder" => codec::record(&self.query_builder),
            "id_" => Ok(codec::opt_string(&self.id)),
            "active" => Ok(codec::opt_bool(&self.active)),
            "owner_id" => Ok(codec::opt_string(&self.owner_id)),
            "created_by_id" => Ok(codec::opt_string(&self.created_by_id)),
            "created_time" => codec::opt_timestamp(Self::RECORD, field, &self.created_time),
            "last_updated_by_id" => Ok(codec::opt_string(&self.last_updated_by_id)),
            "last_updated_time" => {
                codec::opt_timestamp(Self::RECORD, field, &self.last_updated_time)
            }
            "entitlements" => codec::opt_record(&self.entitlements),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        let record = Self::RECORD;
        match field.name {
            "name" => self.name = Some(codec::as_string(record, field, value)?),
            "query_builder" => self.query_builder = codec::as_record(record, field, value)?,
            "id_" => self.id = Some(codec::as_string(record, field, value)?),
            "active" => self.active = Some(codec::as_bool(record, field, value)?),
            "owner_id" => self.owner_id = Some(codec::as_string(record, field, value)?),
            "created_by_id" => self.created_by_id = Some(codec::as_string(record, field, value)?),
            "created_time" => self.created_time = Some(codec::as_timestamp(record, field, value)?),
            "last_updated_by_id" => {
                self.last_updated_by_id = Some(codec::as_string(record, field, value)?)
            }
            "last_updated_time" => {
                self.last_updated_time = Some(codec::as_timestamp(record, field, value)?)
            }
            "entitlements" => self.entitlements = Some(codec::as_record(record, field, value)?),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

wire_serde!(ScreenerQueryBuilder, Screen);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_builder_constants_always_written() {
        let value = codec::to_value(&ScreenerQueryBuilder::new()).unwrap();
        assert_eq!(value, json!({ "assetClass": "Credit", "type": "Bond" }));
    }

    #[test]
    fn test_query_builder_ignores_wire_constants() {
        let qb: ScreenerQueryBuilder = codec::decode(&json!({
            "assetClass": "Equity",
            "type": "Stock",
            "name": "x"
        }))
        .unwrap();
        assert_eq!(qb.asset_class(), "Credit");
        assert_eq!(qb.type_(), "Bond");
        assert_eq!(qb, ScreenerQueryBuilder::new().with_name("x"));
    }

    #[test]
    fn test_screen_unset_name_written_as_null() {
        let value = codec::to_value(&Screen::default()).unwrap();
        assert_eq!(
            value,
            json!({ "name": null, "queryBuilder": { "assetClass": "Credit", "type": "Bond" } })
        );
    }

    #[test]
    fn test_screen_query_builder_must_be_object() {
        let err = codec::decode::<Screen>(&json!({ "name": "a", "queryBuilder": "nope" }))
            .unwrap_err();
        assert!(err.to_string().contains("Screen.queryBuilder"));
    }
}
