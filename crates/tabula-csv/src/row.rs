use std::ops::Index;

/// One CSV record as raw field strings, in input order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Create a row from owned fields
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Get a field by index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// All fields in order
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Iterate over fields as string slices
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Take the fields out of the row
    #[must_use]
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<&[&str]> for Row {
    fn from(fields: &[&str]) -> Self {
        Self::new(fields.iter().map(|f| (*f).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Row {
    fn from(fields: [&str; N]) -> Self {
        Self::from(&fields[..])
    }
}

impl From<Row> for Vec<String> {
    fn from(row: Row) -> Self {
        row.fields
    }
}

impl AsRef<[String]> for Row {
    fn as_ref(&self) -> &[String] {
        &self.fields
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.fields[index]
    }
}

impl FromIterator<String> for Row {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Row {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let row = Row::from(["us", "", "1234"]);
        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some("us"));
        assert_eq!(row.get(1), Some(""));
        assert_eq!(row.get(3), None);
        assert_eq!(&row[2], "1234");
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["us", "", "1234"]);
    }

    #[test]
    fn test_row_conversions() {
        let fields = vec!["a".to_string(), "b".to_string()];
        let row = Row::from(fields.clone());
        assert_eq!(row.fields(), &fields[..]);
        assert_eq!(Vec::<String>::from(row.clone()), fields);
        assert_eq!(row.clone().into_iter().collect::<Vec<_>>(), fields);
        assert_eq!(fields.into_iter().collect::<Row>(), row);
    }

    #[test]
    fn test_empty_row() {
        let row = Row::default();
        assert!(row.is_empty());
        assert_eq!(row.get(0), None);
    }
}
