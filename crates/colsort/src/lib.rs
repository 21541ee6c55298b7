#![forbid(unsafe_code)]

//! colsort
//!
//! Pointer-driven categorization of dataset columns. Columns start in an
//! "unassigned" heap and are dragged one at a time into category buckets,
//! some of which accept a single column only.
//!
//! # Key Components
//!
//! - [`Catalog`] - Bucket identities, labels and capacity rules
//! - [`Distribution`] - Authoritative bucket membership, updated by value
//! - [`validator`] - Capacity checks producing a typed [`Rejection`]
//! - [`DragMachine`] - The single `Idle`/`Dragging` gesture session
//! - [`HoverResolver`] / [`DropZones`] - Which bucket the pointer is over
//! - [`commit()`] - Validate-and-apply at the end of a drag
//! - [`Ghost`] - Pointer-tracking proxy of the dragged column
//! - [`Board`] - Owns all of the above for one screen
//!
//! # Role in colsort
//! `colsort` consumes normalized pointer input and geometry from
//! `colsort-core` and never draws anything itself: hosts read the
//! distribution, ghost and notices from the [`Board`] and render them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use colsort::{Board, BoardConfig, Bucket, Catalog, DropOutcome, Assignment};
//! use colsort_core::{Point, Rect};
//! use web_time::Instant;
//!
//! let catalog = Arc::new(Catalog::new(
//!     [
//!         Bucket::unbounded("heap", "Unassigned"),
//!         Bucket::unbounded("numeric", "Numeric"),
//!         Bucket::single("target", "Target"),
//!     ],
//!     "heap",
//! )?);
//! let (mut board, _report) = Board::load(
//!     catalog,
//!     ["age", "income"],
//!     &Assignment::new(),
//!     BoardConfig::default(),
//! )?;
//!
//! board.pointer_down("age", Point::new(2, 1), Rect::new(0, 1, 10, 1))?;
//! board.zone_enter("numeric");
//! let outcome = board.pointer_up(Point::new(30, 1), Instant::now())?;
//! assert!(matches!(outcome, DropOutcome::Moved(_)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assignment;
pub mod board;
pub mod catalog;
pub mod commit;
pub mod config;
pub mod distribution;
pub mod error;
pub mod ghost;
pub mod history;
pub mod hover;
pub mod notice;
pub mod session;
pub mod validator;

pub use assignment::{Assignment, LoadIssue, LoadReport, Slot};
pub use board::{Board, DropOutcome, PointerOutcome};
pub use catalog::{Bucket, BucketId, Capacity, Catalog, Item, ItemId};
pub use commit::{CommitOutcome, commit};
pub use config::BoardConfig;
pub use distribution::{Distribution, Relocation};
pub use error::{CatalogError, ConfigError, GestureError, InvariantViolation};
pub use ghost::Ghost;
pub use history::History;
pub use hover::{DropZones, HoverResolver};
pub use notice::{Notice, NoticeConfig, NoticeId, NoticeQueue, NoticeStats};
pub use session::{DragMachine, DragSession, DragState};
pub use validator::{Rejection, can_accept};
