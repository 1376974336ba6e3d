use crate::{
    extract_transactions, ColumnLabel, ColumnMapping, ExtractError, ExtractOptions, ExtractReport,
    IntakeError, MappingError, SelectedFile, StatementTable, DEFAULT_PREVIEW_ROWS,
    MAX_PREVIEW_ROWS,
};

/// Possible errors to occur while previewing the selected file
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("No file has been selected")]
    NoFileSelected,
    #[error("The file could not be parsed")]
    Parse(#[from] csv::Error),
}

/// Possible errors to occur while turning the labelled table into transactions
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("There's no previewed table to upload")]
    NoTable,
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// The state of one bank statement upload
///
/// All changes happen synchronously in response to a single user action.
/// Selecting a new file replaces everything that was derived from the
/// previous one.
#[derive(Debug)]
pub struct UploadSession {
    preview_rows: usize,
    /// The accepted file waiting to be previewed
    file: Option<SelectedFile>,
    /// The complete parsed table, kept apart from the preview
    table: Option<StatementTable>,
    mapping: ColumnMapping,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSession {
    /// Creates a new, empty session previewing [`DEFAULT_PREVIEW_ROWS`] rows
    pub fn new() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            file: None,
            table: None,
            mapping: ColumnMapping::new(),
        }
    }

    /// Sets the number of previewed rows, clamped to `1..=MAX_PREVIEW_ROWS`
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows.clamp(1, MAX_PREVIEW_ROWS);
        self
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    /// The currently accepted file
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// The complete parsed table of the last preview
    pub fn table(&self) -> Option<&StatementTable> {
        self.table.as_ref()
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Accepts a file for upload
    ///
    /// Files of an unsupported media type are rejected and leave the session
    /// untouched. An accepted file discards the previous table and labels.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), IntakeError> {
        if !file.media_type().is_supported() {
            tracing::warn!(
                file = file.name(),
                media_type = %file.media_type(),
                "rejected file of unsupported type"
            );
            return Err(IntakeError::UnsupportedMediaType(file.media_type().clone()));
        }

        tracing::info!(file = file.name(), bytes = file.bytes().len(), "selected file");
        self.file = Some(file);
        self.table = None;
        self.mapping = ColumnMapping::new();

        Ok(())
    }

    /// Parses the selected file and returns the first rows of it
    ///
    /// The full table is kept for later extraction. Labels from an earlier
    /// preview are dropped.
    pub fn preview(&mut self) -> Result<&[Vec<String>], PreviewError> {
        let file = self.file
            .as_ref()
            .ok_or(PreviewError::NoFileSelected)?;
        let table = StatementTable::parse(file.bytes())
            .map_err(|err| {
                tracing::warn!(file = file.name(), error = %err, "failed to parse file");
                err
            })?;

        tracing::info!(
            file = file.name(),
            rows = table.len(),
            columns = table.width(),
            "parsed statement"
        );
        self.mapping = ColumnMapping::new();
        let table = self.table.insert(table);

        Ok(table.preview(self.preview_rows))
    }

    /// The first rows of the parsed table, if there is one
    pub fn previewed(&self) -> Option<&[Vec<String>]> {
        self.table
            .as_ref()
            .map(|table| table.preview(self.preview_rows))
    }

    /// Labels a column of the previewed table
    ///
    /// If another column holds `label`, that column loses it. Returns the
    /// evicted column, if any.
    pub fn assign_label(
        &mut self,
        column: usize,
        label: ColumnLabel,
    ) -> Result<Option<usize>, MappingError> {
        let width = self.table
            .as_ref()
            .ok_or(MappingError::NoTable)?
            .width();
        if column >= width {
            return Err(MappingError::ColumnOutOfRange { column, width });
        }

        let evicted = self.mapping.assign(column, label);
        if let Some(evicted) = evicted {
            tracing::debug!(%label, from = evicted, to = column, "moved column label");
        }

        Ok(evicted)
    }

    /// Removes the label of a column
    pub fn clear_label(&mut self, column: usize) -> Option<ColumnLabel> {
        self.mapping.clear(column)
    }

    /// Turns the labelled table into transactions
    ///
    /// Nothing is sent anywhere, the transactions are handed back to the
    /// caller.
    pub fn upload(&self, options: &ExtractOptions) -> Result<ExtractReport, UploadError> {
        let table = self.table
            .as_ref()
            .ok_or(UploadError::NoTable)?;
        let report = extract_transactions(table, &self.mapping, options)?;

        if !report.rejected.is_empty() {
            tracing::warn!(
                rejected = report.rejected.len(),
                accepted = report.transactions.len(),
                "some statement rows could not be read"
            );
        }

        Ok(report)
    }
}
