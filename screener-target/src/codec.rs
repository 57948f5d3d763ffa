//! Record codec: maps internal snake_case fields to their camelCase wire form.
//!
//! Every record publishes a descriptor table ([`Field`]) through the
//! [`Record`] trait. [`encode`] and [`decode`] walk that table, so the
//! external key of a field, whether it is dropped when unset and whether it
//! carries a fixed value are all data rather than per-type code.
//!
//! Wire names default to [`camel_case`] of the internal name. A descriptor
//! may override that (`id_` is written as `id`, `type_` as `type`).

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use convert_case::{Case, Casing};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::errors::{CodecError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const MAX_RFC3339_YEAR: i32 = 9999;

// ============================================================================
// Field descriptors
// ============================================================================

/// Describes one field of a record: internal name, wire name and presence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Internal (snake_case) name.
    pub name: &'static str,
    /// Explicit external name, replacing the camelCase transform.
    pub rename: Option<&'static str>,
    /// Drop the key entirely when the value is unset, instead of writing `null`.
    pub omit_if_absent: bool,
    /// Fixed value owned by the record type; never stored on the instance.
    pub constant: Option<&'static str>,
}

impl Field {
    /// Optional field, left out of the wire form when unset.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            rename: None,
            omit_if_absent: true,
            constant: None,
        }
    }

    /// Field that is always written, as `null` when unset.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            rename: None,
            omit_if_absent: false,
            constant: None,
        }
    }

    /// Fixed discriminator value. Written on every encode, ignored on decode.
    pub const fn constant(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            rename: None,
            omit_if_absent: false,
            constant: Some(value),
        }
    }

    pub const fn rename(self, wire: &'static str) -> Self {
        Self {
            rename: Some(wire),
            ..self
        }
    }

    pub const fn omit_if_absent(self) -> Self {
        Self {
            omit_if_absent: true,
            ..self
        }
    }

    /// External key for this field.
    pub fn wire_name(&self) -> Cow<'static, str> {
        match self.rename {
            Some(wire) => Cow::Borrowed(wire),
            None => Cow::Owned(camel_case(self.name)),
        }
    }
}

/// The fixed internal-to-external name transform: `created_time` -> `createdTime`.
pub fn camel_case(name: &str) -> String {
    name.to_case(Case::Camel)
}

// ============================================================================
// Record trait
// ============================================================================

/// A named record with a descriptor table.
///
/// `get` and `set` are only called for non-constant descriptors listed in
/// [`Record::FIELDS`]; anything else is a [`CodecError::UnknownField`].
pub trait Record: Default {
    /// Type name used in error messages.
    const RECORD: &'static str;
    /// Descriptor table. Key order on the wire follows `serde_json::Map`, not this table.
    const FIELDS: &'static [Field];

    /// Current value of `field`, `Value::Null` when unset.
    fn get(&self, field: &Field) -> Result<Value>;

    /// Assign `field` from a non-null wire value, checking its type.
    fn set(&mut self, field: &Field, value: &Value) -> Result<()>;

    fn unknown(field: &Field) -> CodecError {
        CodecError::UnknownField {
            record: Self::RECORD,
            field: field.name,
        }
    }
}

/// Encode a record into its external object form.
pub fn encode<R: Record>(record: &R) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    for field in R::FIELDS {
        let value = match field.constant {
            Some(constant) => Value::String(constant.to_owned()),
            None => record.get(field)?,
        };
        if value.is_null() && field.omit_if_absent {
            continue;
        }
        out.insert(field.wire_name().into_owned(), value);
    }
    Ok(out)
}

/// Decode a record from its external object form.
///
/// Missing keys and `null` values leave the field at its default. Unknown
/// keys are ignored.
pub fn decode<R: Record>(value: &Value) -> Result<R> {
    let object = value
        .as_object()
        .ok_or_else(|| CodecError::mismatch(R::RECORD, "<record>", "object"))?;

    let mut record = R::default();
    for field in R::FIELDS {
        let wire = field.wire_name();
        let Some(raw) = object.get(&*wire) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }
        match field.constant {
            Some(expected) => {
                let found = raw
                    .as_str()
                    .ok_or_else(|| CodecError::mismatch(R::RECORD, &*wire, "string"))?;
                if found != expected {
                    tracing::debug!(
                        record = R::RECORD,
                        field = %wire,
                        found,
                        expected,
                        "ignoring wire value for constant field"
                    );
                }
            }
            None => record.set(field, raw)?,
        }
    }

    for key in object.keys() {
        if !R::FIELDS.iter().any(|f| f.wire_name() == key.as_str()) {
            tracing::trace!(record = R::RECORD, key = %key, "ignoring unknown wire field");
        }
    }

    Ok(record)
}

pub fn to_value<R: Record>(record: &R) -> Result<Value> {
    encode(record).map(Value::Object)
}

pub fn to_json<R: Record>(record: &R) -> Result<String> {
    Ok(serde_json::to_string(&to_value(record)?)?)
}

pub fn to_json_pretty<R: Record>(record: &R) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(record)?)?)
}

pub fn from_json<R: Record>(text: &str) -> Result<R> {
    let value: Value = serde_json::from_str(text)?;
    decode(&value)
}

/// Implements `serde::Serialize` / `serde::Deserialize` for records by routing
/// through [`encode`] and [`decode`].
macro_rules! wire_serde {
    ($($ty:ty),* $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(
                    &self,
                    serializer: S,
                ) -> std::result::Result<S::Ok, S::Error> {
                    let object = $crate::codec::encode(self).map_err(serde::ser::Error::custom)?;
                    serde::Serialize::serialize(&object, serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(
                    deserializer: D,
                ) -> std::result::Result<Self, D::Error> {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    $crate::codec::decode(&value).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

pub(crate) use wire_serde;

// ============================================================================
// Encode helpers
// ============================================================================

pub fn opt_string(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}

pub fn opt_bool(value: &Option<bool>) -> Value {
    value.map_or(Value::Null, Value::Bool)
}

pub fn opt_strings(value: &Option<Vec<String>>) -> Value {
    match value {
        Some(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        None => Value::Null,
    }
}

/// RFC 3339 in UTC with a `Z` suffix and only the fractional digits needed.
///
/// RFC 3339 only has four-digit years, so timestamps outside years
/// 0000..=9999 are rejected rather than written in a form [`as_timestamp`]
/// cannot read back.
pub fn opt_timestamp(
    record: &'static str,
    field: &Field,
    value: &Option<DateTime<Utc>>,
) -> Result<Value> {
    match value {
        Some(ts) if !(0..=MAX_RFC3339_YEAR).contains(&ts.year()) => {
            Err(CodecError::OutOfRange {
                record,
                field: field.wire_name().into_owned(),
                value: ts.to_string(),
            })
        }
        Some(ts) => Ok(Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
        None => Ok(Value::Null),
    }
}

pub fn opt_date(value: &Option<NaiveDate>) -> Value {
    match value {
        Some(date) => Value::String(date.format(DATE_FORMAT).to_string()),
        None => Value::Null,
    }
}

/// Decimals travel as strings so the exact digits and scale survive.
pub fn opt_decimal(value: &Option<Decimal>) -> Result<Value> {
    match value {
        Some(d) => Ok(serde_json::to_value(d)?),
        None => Ok(Value::Null),
    }
}

pub fn record<R: Record>(value: &R) -> Result<Value> {
    to_value(value)
}

pub fn opt_record<R: Record>(value: &Option<R>) -> Result<Value> {
    match value {
        Some(inner) => to_value(inner),
        None => Ok(Value::Null),
    }
}

// ============================================================================
// Decode helpers
// ============================================================================

fn mismatch(record: &'static str, field: &Field, expected: &'static str) -> CodecError {
    CodecError::mismatch(record, field.wire_name(), expected)
}

pub fn as_string(record: &'static str, field: &Field, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| mismatch(record, field, "string"))
}

pub fn as_bool(record: &'static str, field: &Field, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| mismatch(record, field, "boolean"))
}

pub fn as_strings(record: &'static str, field: &Field, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| mismatch(record, field, "array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| mismatch(record, field, "array of strings"))
        })
        .collect()
}

/// Accepts RFC 3339 with an offset, or a naive date-time taken as UTC.
pub fn as_timestamp(record: &'static str, field: &Field, value: &Value) -> Result<DateTime<Utc>> {
    let text = value
        .as_str()
        .ok_or_else(|| mismatch(record, field, "ISO-8601 timestamp"))?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, NAIVE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| mismatch(record, field, "ISO-8601 timestamp"))
}

pub fn as_date(record: &'static str, field: &Field, value: &Value) -> Result<NaiveDate> {
    value
        .as_str()
        .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok())
        .ok_or_else(|| mismatch(record, field, "date (YYYY-MM-DD)"))
}

/// Accepts a JSON number or a numeric string.
pub fn as_decimal(record: &'static str, field: &Field, value: &Value) -> Result<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Err(mismatch(record, field, "number")),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| mismatch(record, field, "number"))
}

pub fn as_record<R: Record>(record: &'static str, field: &Field, value: &Value) -> Result<R> {
    if !value.is_object() {
        return Err(mismatch(record, field, R::RECORD));
    }
    decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        created_time: Option<DateTime<Utc>>,
        note: Option<String>,
        flag: Option<bool>,
    }

    impl Record for Probe {
        const RECORD: &'static str = "Probe";
        const FIELDS: &'static [Field] = &[
            Field::optional("created_time"),
            Field::required("note"),
            Field::optional("flag_").rename("flag"),
            Field::constant("kind", "Probe").omit_if_absent(),
        ];

        fn get(&self, field: &Field) -> Result<Value> {
            match field.name {
                "created_time" => opt_timestamp(Self::RECORD, field, &self.created_time),
                "note" => Ok(opt_string(&self.note)),
                "flag_" => Ok(opt_bool(&self.flag)),
                _ => Err(Self::unknown(field)),
            }
        }

        fn set(&mut self, field: &Field, value: &Value) -> Result<()> {
            match field.name {
                "created_time" => self.created_time = Some(as_timestamp(Self::RECORD, field, value)?),
                "note" => self.note = Some(as_string(Self::RECORD, field, value)?),
                "flag_" => self.flag = Some(as_bool(Self::RECORD, field, value)?),
                _ => return Err(Self::unknown(field)),
            }
            Ok(())
        }
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("created_time"), "createdTime");
        assert_eq!(camel_case("last_updated_by_id"), "lastUpdatedById");
        assert_eq!(camel_case("rating_standard_and_poors"), "ratingStandardAndPoors");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_wire_name_override() {
        assert_eq!(Field::optional("id_").rename("id").wire_name(), "id");
        assert_eq!(Field::optional("owner_id").wire_name(), "ownerId");
    }

    #[test]
    fn test_encode_presence_rules() {
        let encoded = to_value(&Probe::default()).unwrap();
        // required field written as null, optional ones dropped, constant always present
        assert_eq!(encoded, json!({ "note": null, "kind": "Probe" }));
    }

    #[test]
    fn test_decode_ignores_unknown_and_constant() {
        let probe: Probe = decode(&json!({
            "note": "hello",
            "flag": true,
            "kind": "Other",
            "somethingElse": 42
        }))
        .unwrap();
        assert_eq!(probe.note.as_deref(), Some("hello"));
        assert_eq!(probe.flag, Some(true));
        assert_eq!(to_value(&probe).unwrap()["kind"], "Probe");
    }

    #[test]
    fn test_decode_null_leaves_default() {
        let probe: Probe = decode(&json!({ "note": null, "flag": null })).unwrap();
        assert_eq!(probe, Probe::default());
    }

    #[test]
    fn test_decode_type_mismatch() {
        let err = decode::<Probe>(&json!({ "flag": "yes" })).unwrap_err();
        match err {
            CodecError::SchemaMismatch { record, field, expected } => {
                assert_eq!(record, "Probe");
                assert_eq!(field, "flag");
                assert_eq!(expected, "boolean");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(decode::<Probe>(&json!({ "kind": 7 })).is_err());
        assert!(decode::<Probe>(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_timestamp_formats() {
        let f = Field::optional("created_time");
        let with_offset = as_timestamp("Probe", &f, &json!("2021-03-04T10:00:00+02:00")).unwrap();
        let naive = as_timestamp("Probe", &f, &json!("2021-03-04T08:00:00")).unwrap();
        assert_eq!(with_offset, naive);
        assert_eq!(
            opt_timestamp("Probe", &f, &Some(naive)).unwrap(),
            json!("2021-03-04T08:00:00Z")
        );
        assert!(as_timestamp("Probe", &f, &json!("yesterday")).is_err());
    }

    #[test]
    fn test_timestamp_year_outside_rfc3339_rejected_on_encode() {
        let f = Field::optional("created_time");
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        let err = opt_timestamp("Probe", &f, &Some(far)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::OutOfRange { record: "Probe", ref field, .. } if field == "createdTime"
        ));

        let probe = Probe {
            created_time: Some(far),
            ..Probe::default()
        };
        assert!(to_value(&probe).is_err());

        let last = NaiveDate::from_ymd_opt(9999, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap()
            .and_utc();
        let encoded = opt_timestamp("Probe", &f, &Some(last)).unwrap();
        assert_eq!(encoded, json!("9999-12-31T23:59:59.999999999Z"));
        assert_eq!(as_timestamp("Probe", &f, &encoded).unwrap(), last);
    }

    #[test]
    fn test_decimal_values() {
        let f = Field::optional("min");
        assert_eq!(as_decimal("Probe", &f, &json!(1.5)).unwrap(), Decimal::new(15, 1));
        assert_eq!(as_decimal("Probe", &f, &json!("250")).unwrap(), Decimal::new(250, 0));
        assert_eq!(opt_decimal(&Some(Decimal::new(250, 0))).unwrap(), json!("250"));
        assert_eq!(opt_decimal(&Some(Decimal::new(150, 2))).unwrap(), json!("1.50"));
        assert!(as_decimal("Probe", &f, &json!(true)).is_err());
    }

    #[test]
    fn test_decimal_exact_digits_survive() {
        let f = Field::optional("min");
        for d in [
            Decimal::from_str("0.12345678901234567890123").unwrap(),
            Decimal::MAX,
            Decimal::MIN,
            Decimal::new(1, 28),
        ] {
            let encoded = opt_decimal(&Some(d)).unwrap();
            assert_eq!(encoded, Value::String(d.to_string()));
            assert_eq!(as_decimal("Probe", &f, &encoded).unwrap(), d);
        }
    }
}
