//! Spreadsheet input: row streaming and header-to-column resolution.

pub mod columns;
pub mod rows;

pub use columns::find_column;
pub use rows::RowSource;
