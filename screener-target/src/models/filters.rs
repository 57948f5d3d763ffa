//! Credit-bond filter criteria carried by a screener query.
//!
//! Every field is optional and dropped from the wire form when unset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::codec::{self, wire_serde, Field, Record};
use crate::errors::Result;

// ============================================================================
// Limit / option records
// ============================================================================

/// Inclusive numeric range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterLimits {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl FilterLimits {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: Decimal) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: Decimal) -> Self {
        Self::new(None, Some(max))
    }
}

impl Record for FilterLimits {
    const RECORD: &'static str = "FilterLimits";
    const FIELDS: &'static [Field] = &[Field::optional("min"), Field::optional("max")];

    fn get(&self, field: &Field) -> Result<Value> {
        match field.name {
            "min" => codec::opt_decimal(&self.min),
            "max" => codec::opt_decimal(&self.max),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        let parsed = codec::as_decimal(Self::RECORD, field, value)?;
        match field.name {
            "min" => self.min = Some(parsed),
            "max" => self.max = Some(parsed),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

/// Credit rating range, e.g. `"BBB-"` to `"AAA"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterRatingLimits {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl Record for FilterRatingLimits {
    const RECORD: &'static str = "FilterRatingLimits";
    const FIELDS: &'static [Field] = &[Field::optional("min"), Field::optional("max")];

    fn get(&self, field: &Field) -> Result<Value> {
        match field.name {
            "min" => Ok(codec::opt_string(&self.min)),
            "max" => Ok(codec::opt_string(&self.max)),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        let parsed = codec::as_string(Self::RECORD, field, value)?;
        match field.name {
            "min" => self.min = Some(parsed),
            "max" => self.max = Some(parsed),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

/// Set of accepted string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterStringOptions {
    pub options: Option<Vec<String>>,
}

impl FilterStringOptions {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: Some(options.into_iter().map(Into::into).collect()),
        }
    }
}

impl Record for FilterStringOptions {
    const RECORD: &'static str = "FilterStringOptions";
    const FIELDS: &'static [Field] = &[Field::optional("options")];

    fn get(&self, field: &Field) -> Result<Value> {
        match field.name {
            "options" => Ok(codec::opt_strings(&self.options)),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        match field.name {
            "options" => self.options = Some(codec::as_strings(Self::RECORD, field, value)?),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

/// Calendar-date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterDateLimits {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Record for FilterDateLimits {
    const RECORD: &'static str = "FilterDateLimits";
    const FIELDS: &'static [Field] = &[Field::optional("start_date"), Field::optional("end_date")];

    fn get(&self, field: &Field) -> Result<Value> {
        match field.name {
            "start_date" => Ok(codec::opt_date(&self.start_date)),
            "end_date" => Ok(codec::opt_date(&self.end_date)),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        let parsed = codec::as_date(Self::RECORD, field, value)?;
        match field.name {
            "start_date" => self.start_date = Some(parsed),
            "end_date" => self.end_date = Some(parsed),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

// ============================================================================
// AssetScreenerCreditRequestFilters
// ============================================================================

/// Filter criteria for a credit-bond screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AssetScreenerCreditRequestFilters {
    pub face_value: Option<Decimal>,
    /// `"Buy"` or `"Sell"`.
    pub direction: Option<String>,
    pub liquidity_score: Option<FilterLimits>,
    pub gs_charge_bps: Option<FilterLimits>,
    pub gs_charge_dollars: Option<FilterLimits>,
    pub modified_duration: Option<FilterLimits>,
    pub yield_to_convention: Option<FilterLimits>,
    pub spread_to_benchmark: Option<FilterLimits>,
    pub z_spread: Option<FilterLimits>,
    pub g_spread: Option<FilterLimits>,
    pub mid_price: Option<FilterLimits>,
    pub maturity: Option<FilterLimits>,
    pub amount_outstanding: Option<FilterLimits>,
    pub rating_standard_and_poors: Option<FilterRatingLimits>,
    pub seniority: Option<FilterStringOptions>,
    pub currency: Option<FilterStringOptions>,
    pub sector: Option<FilterStringOptions>,
    pub issue_date: Option<FilterDateLimits>,
}

impl AssetScreenerCreditRequestFilters {
    fn limits(&self, name: &str) -> Option<&Option<FilterLimits>> {
        Some(match name {
            "liquidity_score" => &self.liquidity_score,
            "gs_charge_bps" => &self.gs_charge_bps,
            "gs_charge_dollars" => &self.gs_charge_dollars,
            "modified_duration" => &self.modified_duration,
            "yield_to_convention" => &self.yield_to_convention,
            "spread_to_benchmark" => &self.spread_to_benchmark,
            "z_spread" => &self.z_spread,
            "g_spread" => &self.g_spread,
            "mid_price" => &self.mid_price,
            "maturity" => &self.maturity,
            "amount_outstanding" => &self.amount_outstanding,
            _ => return None,
        })
    }

    fn limits_mut(&mut self, name: &str) -> Option<&mut Option<FilterLimits>> {
        Some(match name {
            "liquidity_score" => &mut self.liquidity_score,
            "gs_charge_bps" => &mut self.gs_charge_bps,
            "gs_charge_dollars" => &mut self.gs_charge_dollars,
            "modified_duration" => &mut self.modified_duration,
            "yield_to_convention" => &mut self.yield_to_convention,
            "spread_to_benchmark" => &mut self.spread_to_benchmark,
            "z_spread" => &mut self.z_spread,
            "g_spread" => &mut self.g_spread,
            "mid_price" => &mut self.mid_price,
            "maturity" => &mut self.maturity,
            "amount_outstanding" => &mut self.amount_outstanding,
            _ => return None,
        })
    }

    fn options(&self, name: &str) -> Option<&Option<FilterStringOptions>> {
        match name {
            "seniority" => Some(&self.seniority),
            "currency" => Some(&self.currency),
            "sector" => Some(&self.sector),
            _ => None,
        }
    }

    fn options_mut(&mut self, name: &str) -> Option<&mut Option<FilterStringOptions>> {
        match name {
            "seniority" => Some(&mut self.seniority),
            "currency" => Some(&mut self.currency),
            "sector" => Some(&mut self.sector),
            _ => None,
        }
    }
}

impl Record for AssetScreenerCreditRequestFilters {
    const RECORD: &'static str = "AssetScreenerCreditRequestFilters";
    const FIELDS: &'static [Field] = &[
        Field::optional("face_value"),
        Field::optional("direction"),
        Field::optional("liquidity_score"),
        Field::optional("gs_charge_bps"),
        Field::optional("gs_charge_dollars"),
        Field::optional("modified_duration"),
        Field::optional("yield_to_convention"),
        Field::optional("spread_to_benchmark"),
        Field::optional("z_spread"),
        Field::optional("g_spread"),
        Field::optional("mid_price"),
        Field::optional("maturity"),
        Field::optional("amount_outstanding"),
        Field::optional("rating_standard_and_poors"),
        Field::optional("seniority"),
        Field::optional("currency"),
        Field::optional("sector"),
        Field::optional("issue_date"),
    ];

    fn get(&self, field: &Field) -> Result<Value> {
        if let Some(limits) = self.limits(field.name) {
            return codec::opt_record(limits);
        }
        if let Some(options) = self.options(field.name) {
            return codec::opt_record(options);
        }
        match field.name {
            "face_value" => codec::opt_decimal(&self.face_value),
            "direction" => Ok(codec::opt_string(&self.direction)),
            "rating_standard_and_poors" => codec::opt_record(&self.rating_standard_and_poors),
            "issue_date" => codec::opt_record(&self.issue_date),
            _ => Err(Self::unknown(field)),
        }
    }

    fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
        if let Some(slot) = self.limits_mut(field.name) {
            *slot = Some(codec::as_record(Self::RECORD, field, value)?);
            return Ok(());
        }
        if let Some(slot) = self.options_mut(field.name) {
            *slot = Some(codec::as_record(Self::RECORD, field, value)?);
            return Ok(());
        }
        match field.name {
            "face_value" => self.face_value = Some(codec::as_decimal(Self::RECORD, field, value)?),
            "direction" => self.direction = Some(codec::as_string(Self::RECORD, field, value)?),
            "rating_standard_and_poors" => {
                self.rating_standard_and_poors = Some(codec::as_record(Self::RECORD, field, value)?)
            }
            "issue_date" => self.issue_date = Some(codec::as_record(Self::RECORD, field, value)?),
            _ => return Err(Self::unknown(field)),
        }
        Ok(())
    }
}

wire_serde!(
    FilterLimits,
    FilterRatingLimits,
    FilterStringOptions,
    FilterDateLimits,
    AssetScreenerCreditRequestFilters,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_wire_names() {
        let filters = AssetScreenerCreditRequestFilters {
            direction: Some("Buy".into()),
            z_spread: Some(FilterLimits::at_most(Decimal::new(250, 0))),
            rating_standard_and_poors: Some(FilterRatingLimits {
                min: Some("BBB-".into()),
                max: Some("AAA".into()),
            }),
            currency: Some(FilterStringOptions::new(["USD", "EUR"])),
            issue_date: Some(FilterDateLimits {
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                end_date: None,
            }),
            ..Default::default()
        };

        assert_eq!(
            codec::to_value(&filters).unwrap(),
            json!({
                "direction": "Buy",
                "zSpread": { "max": "250" },
                "ratingStandardAndPoors": { "min": "BBB-", "max": "AAA" },
                "currency": { "options": ["USD", "EUR"] },
                "issueDate": { "startDate": "2020-01-01" }
            })
        );
    }

    #[test]
    fn test_filters_decode() {
        let filters: AssetScreenerCreditRequestFilters = serde_json::from_value(json!({
            "faceValue": 1000000,
            "modifiedDuration": { "min": 1.5, "max": "7.25" },
            "sector": { "options": ["Financials"] },
            "unknownFilter": { "min": 0 }
        }))
        .unwrap();

        assert_eq!(filters.face_value, Some(Decimal::new(1_000_000, 0)));
        assert_eq!(
            filters.modified_duration,
            Some(FilterLimits::new(Some(Decimal::new(15, 1)), Some(Decimal::new(725, 2))))
        );
        assert_eq!(filters.sector, Some(FilterStringOptions::new(["Financials"])));
        assert!(filters.maturity.is_none());
    }

    #[test]
    fn test_filters_reject_bad_nested_types() {
        let err = serde_json::from_value::<AssetScreenerCreditRequestFilters>(json!({
            "maturity": 5
        }));
        assert!(err.is_err());

        let err = serde_json::from_value::<AssetScreenerCreditRequestFilters>(json!({
            "issueDate": { "startDate": "01/02/2020" }
        }));
        assert!(err.is_err());
    }
}
