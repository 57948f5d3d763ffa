//! JSON report printed by `screener validate`.

use serde::Serialize;

use screener_target::Screen;

/// Outcome of validating one screen document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Report<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Report<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Short description of a decoded screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub query_name: Option<String>,
    pub asset_class: &'static str,
    pub has_filters: bool,
    pub has_entitlements: bool,
}

impl From<&Screen> for ScreenSummary {
    fn from(screen: &Screen) -> Self {
        Self {
            id: screen.id.clone(),
            name: screen.name.clone(),
            query_name: screen.query_builder.name.clone(),
            asset_class: screen.query_builder.asset_class(),
            has_filters: screen.query_builder.filters.is_some(),
            has_entitlements: screen.entitlements.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_target::ScreenerQueryBuilder;
    use serde_json::json;

    #[test]
    fn test_success_report() {
        let screen = Screen::new("IG", ScreenerQueryBuilder::new()).with_id("S1");
        let report = Report::success("valid screen", ScreenSummary::from(&screen));
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "success": true,
                "message": "valid screen",
                "data": {
                    "id": "S1",
                    "name": "IG",
                    "queryName": null,
                    "assetClass": "Credit",
                    "hasFilters": false,
                    "hasEntitlements": false
                }
            })
        );
    }

    #[test]
    fn test_failure_report_has_no_data() {
        let value = serde_json::to_value(Report::failure("bad")).unwrap();
        assert_eq!(value, json!({ "success": false, "message": "bad" }));
    }
}
