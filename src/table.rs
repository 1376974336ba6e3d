/// The number of rows previewed when nothing else is configured
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// The largest preview the upload page renders
pub const MAX_PREVIEW_ROWS: usize = 10;

const SAMPLE_STATEMENT: &str = "\
30/01/2025,-39.93,Purchase at Starbucks
1/02/2025,100,Freelance Project Payment
3/02/2025,-22.75,Grocery Store Purchase
5/02/2025,-19.99,Netflix Subscription
7/02/2025,-15.4,Fast Food Order
";

/// A parsed statement
///
/// Every row is kept as plain string cells, exactly as they appear in the
/// file. No header row is inferred, so a header, if present, is simply the
/// first row. Rows may differ in length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatementTable {
    rows: Vec<Vec<String>>,
}

impl StatementTable {
    /// Parses comma separated values into a table, skipping empty lines
    pub fn parse(bytes: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            // a lone empty cell is an empty line, `,,` is a row of empty cells
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            rows.push(record.iter().map(str::to_owned).collect());
        }

        Ok(Self { rows })
    }

    /// The statement shown to users as an example of a well formed upload
    pub fn sample() -> Self {
        let rows = SAMPLE_STATEMENT
            .lines()
            .map(|line| line.split(',').map(str::to_owned).collect())
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The number of columns offered for labelling
    ///
    /// This is the width of the first row. Later rows may be shorter or longer.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The first `rows` rows of the table
    pub fn preview(&self, rows: usize) -> &[Vec<String>] {
        &self.rows[..rows.min(self.rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! parse_test {
        (
            $name:ident
            $input:literal
            $expected:expr
        ) => {
            #[test]
            fn $name() {
                let table = StatementTable::parse($input.as_bytes()).unwrap();
                let expected: Vec<Vec<&str>> = $expected;
                assert_eq!(table.rows(), expected);
            }
        };
    }

    parse_test!(with_header
        "Date,Amount,Description\n30/01/2025,-39.93,Purchase at Starbucks\n1/02/2025,100,Freelance Project Payment\n"
        vec![
            vec!["Date", "Amount", "Description"],
            vec!["30/01/2025", "-39.93", "Purchase at Starbucks"],
            vec!["1/02/2025", "100", "Freelance Project Payment"],
        ]
    );
    parse_test!(without_header
        "30/01/2025,-39.93,Purchase at Starbucks\n"
        vec![vec!["30/01/2025", "-39.93", "Purchase at Starbucks"]]
    );
    parse_test!(empty_lines
        "a,b\n\n\r\n\nc,d\ne,f\n\n"
        vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]]
    );
    parse_test!(blank_cells_are_rows
        "a,b,c\n,,\n   \nd,e,f"
        vec![vec!["a", "b", "c"], vec!["", "", ""], vec!["   "], vec!["d", "e", "f"]]
    );
    parse_test!(ragged_rows
        "a,b,c\nd\ne,f,g,h"
        vec![vec!["a", "b", "c"], vec!["d"], vec!["e", "f", "g", "h"]]
    );
    parse_test!(quoted_cells
        "7/02/2025,\"1,250.00\",\"Rent, March\"\n"
        vec![vec!["7/02/2025", "1,250.00", "Rent, March"]]
    );
    parse_test!(surrounding_whitespace
        "a,b,c\n  x , y ,z\n"
        vec![vec!["a", "b", "c"], vec!["  x ", " y ", "z"]]
    );
    parse_test!(empty_input
        ""
        Vec::new()
    );

    #[test]
    fn invalid_utf8() {
        assert!(StatementTable::parse(b"a,\xff\xfe\n").is_err());
    }

    #[test]
    fn preview_truncates() {
        let table = StatementTable::sample();
        assert_eq!(table.len(), 5);
        assert_eq!(table.preview(2).len(), 2);
        assert_eq!(table.preview(2)[1][2], "Freelance Project Payment");
        assert_eq!(table.preview(MAX_PREVIEW_ROWS).len(), 5);
        assert!(table.preview(0).is_empty());
    }

    #[test]
    fn width_follows_first_row() {
        let table = StatementTable::parse(b"a,b\nc,d,e\n").unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(StatementTable::default().width(), 0);
    }

    #[test]
    fn sample_matches_parsed_sample() {
        let parsed = StatementTable::parse(SAMPLE_STATEMENT.as_bytes()).unwrap();
        assert_eq!(parsed, StatementTable::sample());
        assert_eq!(parsed.rows()[0], vec!["30/01/2025", "-39.93", "Purchase at Starbucks"]);
    }
}
