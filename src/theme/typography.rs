//! Typography plugin overrides (`theme.extend.typography`).
//!
//! ```toml
//! [theme.extend.typography.DEFAULT.css]
//! pre = false              # reset the plugin's styling
//! "code::before" = false
//! a = { color = "#0f766e" } # style record
//! ```
//!
//! JSON documents spell the reset as `null`.

use crate::config::{Merge, merge::join_path};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor, value::MapAccessDeserializer},
};
use std::{collections::BTreeMap, fmt};

/// Style properties of one selector, in document order.
pub type StyleRecord = serde_json::Map<String, serde_json::Value>;

/// What a typography override does to one selector.
#[derive(Debug, Clone, PartialEq)]
pub enum TypographyRule {
    /// Drop the plugin's default styling for the selector.
    Reset,
    /// Replace it with these properties.
    Style(StyleRecord),
}

crate::replace_merge!(TypographyRule);

impl TypographyRule {
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }

    pub fn style(&self) -> Option<&StyleRecord> {
        match self {
            Self::Reset => None,
            Self::Style(style) => Some(style),
        }
    }
}

impl Serialize for TypographyRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reset => serializer.serialize_none(),
            Self::Style(style) => style.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypographyRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RuleVisitor)
    }
}

struct RuleVisitor;

impl<'de> Visitor<'de> for RuleVisitor {
    type Value = TypographyRule;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a style table, or null / false to reset")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TypographyRule::Reset)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TypographyRule::Reset)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        if v {
            Err(E::invalid_value(de::Unexpected::Bool(true), &self))
        } else {
            Ok(TypographyRule::Reset)
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        StyleRecord::deserialize(MapAccessDeserializer::new(map)).map(TypographyRule::Style)
    }
}

/// One typography variant (`DEFAULT`, `lg`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyVariant {
    /// Selector -> rule.
    pub css: BTreeMap<String, TypographyRule>,
}

impl TypographyVariant {
    pub fn rule(&self, selector: &str) -> Option<&TypographyRule> {
        self.css.get(selector)
    }
}

impl Merge for TypographyVariant {
    fn merge(&mut self, other: Self) {
        self.css.merge(other.css);
    }

    fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>) {
        self.css.conflicts(&other.css, &join_path(path, "css"), out);
    }
}
