//! Three-state JSON fields for partial updates

use serde::{Deserialize, Deserializer};

/// Deserialize a field that was present in the body.
///
/// Paired with `#[serde(default)]`: an absent key stays `None`, an explicit
/// `null` becomes `Some(None)`, and a value becomes `Some(Some(v))`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "present")]
        city: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.city, None);

        let null: Body = serde_json::from_str(r#"{"city": null}"#).unwrap();
        assert_eq!(null.city, Some(None));

        let value: Body = serde_json::from_str(r#"{"city": "Lagos"}"#).unwrap();
        assert_eq!(value.city, Some(Some("Lagos".into())));
    }
}
