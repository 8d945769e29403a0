use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for personal data (national ID numbers, phone numbers).
///
/// `Debug` never prints the value and `Display` keeps only the first three and
/// last four characters, the way ticket receipts print ID numbers. Serialization
/// emits the real value since API clients need it back.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&partial_mask(self.0.as_ref()))
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Keep the first 3 and last 4 characters, star out the rest.
/// Values of 7 characters or fewer are starred out entirely.
fn partial_mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 7 {
        return "*".repeat(chars.len());
    }

    let hidden = chars.len() - 7;
    let mut out = String::with_capacity(chars.len());
    out.extend(&chars[..3]);
    out.extend(std::iter::repeat('*').take(hidden));
    out.extend(&chars[chars.len() - 4..]);
    out
}
