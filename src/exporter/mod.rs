//! Writers for the finished perk list: CSV, XLSX and the flashcard viewer.

mod csv_export;
mod html_viewer;
mod xlsx_export;

pub use csv_export::write_csv;
pub use html_viewer::{render_html, write_html};
pub use xlsx_export::write_xlsx;
