use std::ops::Deref;

use serde::Deserialize;

/// A [`std::time::Duration`] deserialized from a human readable string like
/// `"1d 2h 3m 4s"` or `"3000ms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

fn parse(s: &str) -> Option<std::time::Duration> {
    let mut out = std::time::Duration::default();
    for part in s.split_whitespace() {
        let split = part.find(|c: char| !c.is_ascii_digit())?;
        let (value, unit) = part.split_at(split);
        let value = value.parse::<u64>().ok()?;
        let part = match unit {
            "ms" => std::time::Duration::from_millis(value),
            "s" => std::time::Duration::from_secs(value),
            "m" => std::time::Duration::from_secs(value.checked_mul(60)?),
            "h" => std::time::Duration::from_secs(value.checked_mul(3600)?),
            "d" => std::time::Duration::from_secs(value.checked_mul(24 * 3600)?),
            _ => return None,
        };
        out = out.checked_add(part)?;
    }
    Some(out)
}
