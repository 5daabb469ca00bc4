//! Micro-unit chip amounts travel as decimal strings, since they
//! overflow the integers JSON consumers can hold.
use crate::Chips;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;

pub fn serialize<S>(chips: &Chips, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&chips.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Chips, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<Chips>()
        .map_err(|e| serde::de::Error::custom(format!("bad amount {:?}: {}", s, e)))
}

/// `""` stands for no amount
pub mod optional {
    use crate::Chips;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S>(chips: &Option<Chips>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match chips {
            Some(chips) => serializer.serialize_str(&chips.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Chips>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "" => Ok(None),
            _ => s
                .parse::<Chips>()
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("bad amount {:?}: {}", s, e))),
        }
    }
}

pub mod list {
    use crate::Chips;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(chips: &[Chips], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(chips.len()))?;
        for amount in chips {
            seq.serialize_element(&amount.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Chips>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|s| {
                s.parse::<Chips>()
                    .map_err(|e| serde::de::Error::custom(format!("bad amount {:?}: {}", s, e)))
            })
            .collect()
    }
}
