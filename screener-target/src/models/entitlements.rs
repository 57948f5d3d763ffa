//! Access-control lists attached to a saved screen.

use serde_json::Value;

use crate::codec::{self, wire_serde, Field, Record};
use crate::errors::Result;

/// Who may do what with an entity. Each list holds principal references
/// such as `guid:…` or `role:…`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Entitlements {
    pub view: Option<Vec<String>>,
    pub edit: Option<Vec<String>>,
    pub admin: Option<Vec<String>>,
    pub rebalance: Option<Vec<String>>,
    pub execute: Option<Vec<String>>,
    pub trade: Option<Vec<String>>,
    pub upload: Option<Vec<String>>,
    pub query: Option<Vec<String>>,
    pub performance_details: Option<Vec<String>>,
    pub plot: Option<Vec<String>>,
    pub delete: Option<Vec<String>>,
    pub display: Option<Vec<String>>,
}

impl Entitlements {
    fn slot(&self, name: &str) -> Option<&Option<Vec<String>>> {
        Some(match name {
            "view" => &self.view,
            "edit" => &self.edit,
            "admin" => &self.admin,
            "rebalance" => &self.rebalance,
            "execute" => &self.execute,
            "trade" => &self.trade,
            "upload" => &self.upload,
            "query" => &self.query,
            "performance_details" => &self.performance_details,
            "plot" => &self.plot,
            "delete" => &self.delete,
            "display" => &self.display,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<Vec<String>>> {
        Some(match name {
            "view" => &mut self.view,
            "edit" => &mut self.edit,
            "admin" => &mut self.admin,
            "rebalance" => &mut self.rebalance,
            "execute" => &mut self.execute,
            "trade" => &mut self.trade,
            "upload" => &mut self.upload,
            "query" => &mut self.query,
            "performance_details" => &mut self.performance_details,
            "plot" => &mut self.plot,
            "delete" => &mut self.delete,
            "display" => &mut self.display,
            _ => return None,
        })
    }
}

impl Record for Entitlements {
    const RECORD: &'static str = "Entitlements";
    const FIELDS: &'static [Field] = &[
        Field::optional("view"),
        Field::optional("edit"),
        Field::optional("admin"),
        Field::optional("rebalance"),
        Field::optional("execute"),
        Field::optional("trade"),
        Field::optional("upload"),
        Field::optional("query"),
        Field::optional("performance_details"),
        Field::optional("plot"),
        Field::optional("delete"),
        Field::optional("display"),
    ];

    fn get(&self, field: &Field) -> Result<Value> {
        self.slot(field.name)
            .map(codec::opt_strings)
            .ok_or_else(|| Self::unknown(field))
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        let parsed = codec::as_strings(Self::RECORD, field, value)?;
        let slot = self
            .slot_mut(field.name)
            .ok_or_else(|| Self::unknown(field))?;
        *slot = Some(parsed);
        Ok(())
    }
}

wire_serde!(Entitlements);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entitlements_round_trip() {
        let ent = Entitlements {
            view: Some(vec!["guid:abc".into(), "role:desk".into()]),
            performance_details: Some(vec![]),
            ..Default::default()
        };
        let value = codec::to_value(&ent).unwrap();
        assert_eq!(
            value,
            json!({ "view": ["guid:abc", "role:desk"], "performanceDetails": [] })
        );
        assert_eq!(codec::decode::<Entitlements>(&value).unwrap(), ent);
    }

    #[test]
    fn test_entitlements_rejects_non_string_member() {
        assert!(codec::decode::<Entitlements>(&json!({ "edit": ["guid:abc", 3] })).is_err());
    }
}
