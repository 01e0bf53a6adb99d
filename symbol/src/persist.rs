use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::{Symbol, SymbolResult};

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

// Restored text is always interned again, so a deserialized symbol is the
// canonical instance of this process rather than a lookalike copy.
struct SymbolVisitor;

impl Visitor<'_> for SymbolVisitor {
    type Value = Symbol;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("the text of a symbol")
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Symbol, E> {
        Ok(Symbol::of(text))
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(SymbolVisitor)
    }
}

pub fn to_json(symbol: &Symbol) -> SymbolResult<String> {
    Ok(serde_json::to_string(symbol)?)
}

pub fn from_json(json: &str) -> SymbolResult<Symbol> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolError;

    #[test]
    fn symbols_persist_as_plain_strings() {
        let symbol = Symbol::of("persisted");
        insta::assert_snapshot!(to_json(&symbol).unwrap(), @r#""persisted""#);
        insta::assert_snapshot!(to_json(&Symbol::of("with \"quotes\"")).unwrap(), @r#""with \"quotes\"""#);
    }

    #[test]
    fn restored_symbol_is_the_canonical_instance() {
        let symbol = Symbol::of("round trip");
        let json = to_json(&symbol).expect("should serialize");
        let restored = from_json(&json).expect("should deserialize");

        assert_eq!(symbol, restored);
        assert!(Symbol::ptr_eq(&symbol, &restored));
    }

    #[test]
    fn restoring_escaped_text_still_interns() {
        let symbol = Symbol::of("tab\there");
        let restored = from_json(r#""tab\there""#).expect("should deserialize");

        assert!(Symbol::ptr_eq(&symbol, &restored));
    }

    #[test]
    fn null_is_not_a_symbol() {
        let err = from_json("null").expect_err("null should be rejected");
        assert!(matches!(err, SymbolError::Json(_)));
        assert!(err.to_string().contains("expected the text of a symbol"));
    }

    #[test]
    fn numbers_are_not_symbols() {
        let err = from_json("42").expect_err("numbers should be rejected");
        assert!(matches!(err, SymbolError::Json(_)));
    }
}
