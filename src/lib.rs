pub use self::{
    intake::{IntakeError, MediaType, SelectedFile, SUPPORTED_MEDIA_TYPES},
    mapping::{ColumnLabel, ColumnMapping, MappingError},
    session::{PreviewError, UploadError, UploadSession},
    table::{StatementTable, DEFAULT_PREVIEW_ROWS, MAX_PREVIEW_ROWS},
    transaction::{
        extract_transactions, ExtractError, ExtractOptions, ExtractReport, RejectedRow, RowError,
        StatementTransaction, DEFAULT_DATE_FORMATS,
    },
};

mod intake;
mod mapping;
mod session;
mod table;
mod transaction;
