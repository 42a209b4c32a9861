//! Decoding of untyped GraphQL response trees into typed results.
//!
//! Decoding goes through an intermediate JSON byte encoding: the extracted
//! sub-tree is serialized and then deserialized into the target type. One
//! generic path serves every shape, and a decode either fully succeeds or
//! fails as a whole.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Expect, Result};

/// The `data` object of a GraphQL response.
pub type ResponseTree = serde_json::Map<String, Value>;

/// Returns the value stored at `key` if it has the expected kind.
///
/// A missing key, a `null`, or a value of the other kind is a shape error.
pub fn extract<'a>(tree: &'a ResponseTree, key: &str, expect: Expect) -> Result<&'a Value> {
    let value = tree.get(key).ok_or_else(|| shape_error(key, expect))?;
    let matches = match expect {
        Expect::Object => value.is_object(),
        Expect::List => value.is_array(),
    };
    if matches {
        Ok(value)
    } else {
        Err(shape_error(key, expect))
    }
}

/// Re-encodes `subtree` and decodes it into `T`.
///
/// `key` only labels the error.
pub fn decode<T: DeserializeOwned>(subtree: &Value, key: &str) -> Result<T> {
    let bytes = serde_json::to_vec(subtree).map_err(Error::Encode)?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
        key: key.to_string(),
        source,
    })
}

/// Extracts the object at `key` and decodes it into `T`.
pub fn decode_object<T: DeserializeOwned>(tree: &ResponseTree, key: &str) -> Result<T> {
    let subtree = extract(tree, key, Expect::Object)?;
    decode(subtree, key)
}

/// Extracts the list at `key` and decodes it into `Vec<T>`.
pub fn decode_list<T: DeserializeOwned>(tree: &ResponseTree, key: &str) -> Result<Vec<T>> {
    let subtree = extract(tree, key, Expect::List)?;
    decode(subtree, key)
}

fn shape_error(key: &str, expected: Expect) -> Error {
    Error::Shape {
        key: key.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    crate::graphql_shape! {
        struct Token {
            id: String => "id",
            symbol: String => "symbol",
            derived_eth: String => "derivedETH",
        }
    }

    crate::graphql_shape! {
        struct DayData {
            date: i64 => "date",
            price_usd: String => "priceUSD",
        }
    }

    fn tree(value: Value) -> ResponseTree {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_decode_object_maps_wire_names() {
        let tree = tree(json!({
            "token": {"id": "0x1", "symbol": "WETH", "derivedETH": "1"}
        }));
        let token: Token = decode_object(&tree, "token").unwrap();
        assert_eq!(
            token,
            Token {
                id: "0x1".into(),
                symbol: "WETH".into(),
                derived_eth: "1".into(),
            }
        );
    }

    #[test]
    fn test_decode_list() {
        let tree = tree(json!({
            "tokenDayDatas": [
                {"date": 1_600_000_000, "priceUSD": "1.001"},
                {"date": 1_600_086_400, "priceUSD": "0.999"}
            ]
        }));
        let days: Vec<DayData> = decode_list(&tree, "tokenDayDatas").unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, 1_600_086_400);
        assert_eq!(days[1].price_usd, "0.999");
    }

    #[test]
    fn test_extra_wire_fields_are_ignored() {
        let tree = tree(json!({
            "token": {"id": "0x1", "symbol": "WETH", "derivedETH": "1", "__typename": "Token"}
        }));
        assert!(decode_object::<Token>(&tree, "token").is_ok());
    }

    #[test]
    fn test_missing_key_is_shape_error() {
        let tree = tree(json!({"pair": {}}));
        let err = decode_object::<Token>(&tree, "token").unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_null_is_shape_error() {
        let tree = tree(json!({"token": null}));
        let err = extract(&tree, "token", Expect::Object).unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                expected: Expect::Object,
                ..
            }
        ));
    }

    #[test]
    fn test_kind_mismatch_is_shape_error() {
        let tree = tree(json!({"tokens": {"id": "0x1"}, "token": []}));
        assert!(decode_list::<Token>(&tree, "tokens").unwrap_err().is_shape());
        assert!(decode_object::<Token>(&tree, "token").unwrap_err().is_shape());
    }

    #[test]
    fn test_incompatible_type_fails_whole_decode() {
        let tree = tree(json!({
            "tokenDayDatas": [
                {"date": 1_600_000_000, "priceUSD": "1.001"},
                {"date": "yesterday", "priceUSD": "0.999"}
            ]
        }));
        let err = decode_list::<DayData>(&tree, "tokenDayDatas").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("tokenDayDatas"));
    }

    #[test]
    fn test_missing_tagged_field_fails_decode() {
        let tree = tree(json!({"token": {"id": "0x1", "symbol": "WETH"}}));
        assert!(decode_object::<Token>(&tree, "token")
            .unwrap_err()
            .is_decode());
    }
}
