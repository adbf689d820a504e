//! reviewdoc - Monthly review report generator for multi-sheet Excel workbooks
//!
//! This crate extracts customer review records from a multi-sheet XLSX
//! workbook (one sheet per shop), filters them by a target calendar month,
//! and renders them into a formatted report document grouped by shop and
//! separated by page breaks.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use chrono::Local;
//! use reviewdoc::{FolderStore, ReportBuilder, RunOutcome, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a generator with default settings
//!     let generator = ReportBuilder::new().build()?;
//!
//!     // Resolve the target month from persisted settings
//!     let settings = Settings::load(&Settings::default_path())?;
//!     let period = generator.resolve_period(&settings, Local::now().date_naive());
//!
//!     // Open the review workbook and the destination folder
//!     let input = File::open("reviews.xlsx")?;
//!     let store = FolderStore::open("/reports")?;
//!
//!     // Generate the report
//!     match generator.generate(input, &period, &store)? {
//!         RunOutcome::Created(handle) => println!("Created: {}", handle.path.display()),
//!         RunOutcome::NoData(period) => println!("No data for {}", period.label()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use reviewdoc::{PeriodFallback, ReportBuilder, ReportFormat};
//!
//! fn main() -> Result<(), reviewdoc::ReportError> {
//!     // Target an explicit month, render as HTML
//!     let generator = ReportBuilder::new()
//!         .with_period(2024, 6)
//!         .with_format(ReportFormat::Html)
//!         .build()?;
//!
//!     // Or fall back to the previous month when no period is persisted
//!     let generator = ReportBuilder::new()
//!         .with_fallback(PeriodFallback::PreviousMonth)
//!         .build()?;
//!     # let _ = generator;
//!     Ok(())
//! }
//! ```
//!
//! # Auxiliary Transforms
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::path::Path;
//! use reviewdoc::{CommentExtractor, WorkbookTransform};
//!
//! fn main() -> Result<(), reviewdoc::ReportError> {
//!     // Strip machine-translation markers from review text
//!     let transform = WorkbookTransform::ExtractOriginal(CommentExtractor::default());
//!     let input = File::open("reviews.xlsx")?;
//!     let summary = transform.run(input, Path::new("reviews_original.xlsx"))?;
//!     println!("{} sheets processed", summary.processed_sheets);
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod document;
mod error;
mod extract;
mod formatter;
mod output;
mod parser;
mod period;
mod security;
mod settings;
mod transforms;
mod types;

// 公開API
pub use api::{PeriodFallback, ReportFormat};
pub use builder::{ReportBuilder, ReportGenerator, RunOutcome};
pub use document::{Block, FontSpec, ReportDocument};
pub use error::ReportError;
pub use extract::{build_section, filter_and_format};
pub use formatter::{DateFormatter, RowFormatter, StarFormatter, NO_RATING_LABEL};
pub use output::{DocumentRenderer, FolderStore, ReportHandle};
pub use period::TargetPeriod;
pub use settings::Settings;
pub use transforms::{
    extract_original_text, to_jst, CommentExtractor, DateNormalizer, TransformSummary,
    WorkbookTransform,
};
pub use types::{DateCell, RatingCell, RawRow, ReviewEntry, ShopSection};
