//! Field-set and patch generation for collections.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a present patch key as `Some`, including an explicit `null`
/// on an optional field (which clears it).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Deserializes a stored column, reading `null` and blank text as the
/// field's default.
///
/// Rows written by older clients carry `""` for unset dates and amounts,
/// and the datastore returns `null` for unset columns. A blank string is
/// kept as-is where the field holds text. A numeric string is read as the
/// number.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        Value::String(text) => {
            let blank = text.trim().is_empty();
            let number = text.trim().parse::<serde_json::Number>().ok();
            match T::deserialize(Value::String(text)) {
                Ok(value) => Ok(value),
                Err(_) if blank => Ok(T::default()),
                Err(err) => match number {
                    Some(number) => T::deserialize(Value::Number(number)).map_err(D::Error::custom),
                    None => Err(D::Error::custom(err)),
                },
            }
        }
        other => T::deserialize(other).map_err(D::Error::custom),
    }
}

/// Defines a collection's field set together with its partial-update type.
///
/// The field set deserializes leniently: missing keys, `null` and blank
/// values take their defaults, and extra columns from the datastore are
/// ignored. The patch is closed and rejects unknown keys.
macro_rules! define_fields {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $patch:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(deserialize_with = "crate::model::fields::lenient")]
                pub $field: $ty,
            )+
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`]. `None` leaves a field untouched.")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $patch {
            $(
                $(#[$fmeta])*
                #[serde(
                    default,
                    deserialize_with = "crate::model::fields::present",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $field: Option<$ty>,
            )+
        }

        impl $crate::model::record::Patch<$name> for $patch {
            fn apply(&self, fields: &mut $name) {
                $(
                    if let Some(value) = &self.$field {
                        fields.$field = value.clone();
                    }
                )+
            }

            fn is_empty(&self) -> bool {
                $(self.$field.is_none())&&+
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::model::{Gig, GigStatus, GigType, Task, TaskStatus};
    use serde_json::json;

    #[test]
    fn test_blank_dates_and_amounts_read_as_unset() {
        let task: Task = serde_json::from_value(json!({
            "title": "Mix EP",
            "category": "Studio",
            "priority": "High",
            "status": "To Do",
            "due_date": "",
            "notes": ""
        }))
        .unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.notes.as_deref(), Some(""));

        let gig: Gig = serde_json::from_value(json!({
            "venue": "The Loft",
            "date": "",
            "pay": ""
        }))
        .unwrap();
        assert_eq!(gig.date, None);
        assert_eq!(gig.pay, None);
    }

    #[test]
    fn test_null_columns_take_defaults() {
        let gig: Gig = serde_json::from_value(json!({
            "venue": "Mohawk",
            "type": null,
            "status": null,
            "city": null
        }))
        .unwrap();
        assert_eq!(gig.kind, GigType::Headline);
        assert_eq!(gig.status, GigStatus::Pending);
        assert_eq!(gig.city, None);

        let task: Task = serde_json::from_value(json!({ "title": null, "status": null })).unwrap();
        assert_eq!(task.title, "");
        assert_eq!(task.status, TaskStatus::ToDo);
    }

    #[test]
    fn test_numeric_text_reads_as_number() {
        let gig: Gig = serde_json::from_value(json!({ "venue": "Stubb's", "pay": "500" })).unwrap();
        assert_eq!(gig.pay, Some(500.0));
    }

    #[test]
    fn test_unknown_label_still_rejected() {
        assert!(serde_json::from_value::<Gig>(json!({ "venue": "Stubb's", "status": "Maybe" })).is_err());
        assert!(serde_json::from_value::<Gig>(json!({ "venue": "Stubb's", "pay": "lots" })).is_err());
    }
}
