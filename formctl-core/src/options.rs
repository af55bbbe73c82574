//! Option sets for select-style fields
//!
//! Stored and transmitted as one comma-joined string ("US,CA,MX"). In memory
//! the choices are an ordered list, so an individual option can never hold the
//! delimiter itself.

use std::fmt;

use crate::error::{FormError, Result};

/// Separator between options on the wire and in storage
pub const OPTION_DELIMITER: char = ',';

/// Ordered list of selectable choices.
///
/// Values are kept exactly as given: no trimming and no de-duplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OptionSet(Vec<String>);

impl OptionSet {
    /// Build an option set from individual values.
    ///
    /// # Errors
    /// Returns `FormError::OptionContainsDelimiter` if any value contains `,`,
    /// and `FormError::LoneEmptyOption` for `[""]`, whose wire form is the
    /// same as the empty set's.
    ///
    /// # Example
    /// ```
    /// use formctl_core::OptionSet;
    ///
    /// let set = OptionSet::new(["US", "CA"]).unwrap();
    /// assert_eq!(set.to_wire(), "US,CA");
    /// assert!(OptionSet::new(["a,b"]).is_err());
    /// assert!(OptionSet::new([""]).is_err());
    /// ```
    pub fn new<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(Into::into)
            .collect::<Vec<String>>();

        if let Some(bad) = values.iter().find(|v| v.contains(OPTION_DELIMITER)) {
            return Err(FormError::OptionContainsDelimiter { value: bad.clone() });
        }
        if matches!(values.as_slice(), [only] if only.is_empty()) {
            return Err(FormError::LoneEmptyOption);
        }

        Ok(Self(values))
    }

    /// Split the comma-joined wire text.
    ///
    /// Never fails: every segment is delimiter-free by construction. The empty
    /// string is the empty set, so `parse(s).to_wire() == s` for all `s`.
    pub fn parse(wire: &str) -> Self {
        if wire.is_empty() {
            return Self::default();
        }
        Self(wire.split(OPTION_DELIMITER).map(str::to_owned).collect())
    }

    /// Join back into the wire/storage encoding.
    pub fn to_wire(&self) -> String {
        self.0.join(",")
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order() {
        let set = OptionSet::parse("US,CA,MX");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["US", "CA", "MX"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn parse_does_not_trim_or_dedup() {
        let set = OptionSet::parse(" a,a,,b ");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![" a", "a", "", "b "]);
    }

    #[test]
    fn empty_wire_is_empty_set() {
        let set = OptionSet::parse("");
        assert!(set.is_empty());
        assert_eq!(set.to_wire(), "");
    }

    #[test]
    fn rejects_embedded_delimiter() {
        let err = OptionSet::new(["ok", "not,ok"]).unwrap_err();
        assert!(matches!(
            err,
            FormError::OptionContainsDelimiter { value } if value == "not,ok"
        ));
    }

    #[test]
    fn lone_empty_option_is_rejected() {
        assert!(matches!(
            OptionSet::new([""]).unwrap_err(),
            FormError::LoneEmptyOption
        ));

        // Two empty options still have a distinct wire form
        let set = OptionSet::new(["", ""]).unwrap();
        assert_eq!(set.to_wire(), ",");
        assert_eq!(OptionSet::parse(&set.to_wire()), set);
    }

    #[test]
    fn contains_is_exact() {
        let set = OptionSet::parse("Yes,No");
        assert!(set.contains("Yes"));
        assert!(!set.contains("yes"));
        assert!(!set.contains("Yes,No"));
    }

    #[test]
    fn display_is_wire_text() {
        let set = OptionSet::new(vec!["Red".to_string(), "Blue".to_string()]).unwrap();
        assert_eq!(set.to_string(), "Red,Blue");
    }
}
