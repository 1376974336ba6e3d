use std::collections::BTreeMap;

/// The semantic labels a statement column can carry
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnLabel {
    Date,
    Description,
    Amount,
}

impl ColumnLabel {
    /// All labels, in the order they are offered to the user
    pub const ALL: [ColumnLabel; 3] = [
        ColumnLabel::Date,
        ColumnLabel::Description,
        ColumnLabel::Amount,
    ];
}

impl std::fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ColumnLabel::Date => "Date",
            ColumnLabel::Description => "Description",
            ColumnLabel::Amount => "Amount",
        };
        f.write_str(label)
    }
}

/// Possible errors to occur while labelling columns
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("There's no previewed table to label")]
    NoTable,
    #[error("Column {column} is out of range for a table with {width} columns")]
    ColumnOutOfRange { column: usize, width: usize },
}

/// The assignment of labels to column indices
///
/// A label belongs to at most one column. Assigning a label to a column
/// evicts it from whichever column held it before.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    /// column index -> label
    columns: BTreeMap<usize, ColumnLabel>,
    /// label -> column index, always the inverse of `columns`
    labels: BTreeMap<ColumnLabel, usize>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `label` to `column`
    ///
    /// Returns the column the label was evicted from, if any.
    pub fn assign(&mut self, column: usize, label: ColumnLabel) -> Option<usize> {
        let evicted = match self.labels.insert(label, column) {
            Some(previous) if previous != column => {
                self.columns.remove(&previous);
                Some(previous)
            }
            _ => None,
        };

        if let Some(replaced) = self.columns.insert(column, label) {
            if replaced != label {
                self.labels.remove(&replaced);
            }
        }

        evicted
    }

    /// Removes the label from `column`, returning it
    pub fn clear(&mut self, column: usize) -> Option<ColumnLabel> {
        let label = self.columns.remove(&column)?;
        self.labels.remove(&label);
        Some(label)
    }

    /// The label of `column`
    pub fn label_of(&self, column: usize) -> Option<ColumnLabel> {
        self.columns.get(&column).copied()
    }

    /// The column holding `label`
    pub fn column_of(&self, label: ColumnLabel) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    /// Whether every label is assigned to a column
    pub fn is_complete(&self) -> bool {
        ColumnLabel::ALL
            .iter()
            .all(|label| self.labels.contains_key(label))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The labelled columns in ascending column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, ColumnLabel)> + '_ {
        self.columns.iter().map(|(&column, &label)| (column, label))
    }
}
