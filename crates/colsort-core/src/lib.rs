#![forbid(unsafe_code)]

//! Core: geometry and normalized pointer input for colsort.
//!
//! # Role in colsort
//! `colsort-core` is the input layer. It owns the coordinate types used for
//! element bounds, drop zones, and ghost placement, and the host-agnostic
//! pointer events the categorization engine (`colsort`) consumes.
//!
//! # How it fits in the system
//! Hosts (a browser shim, a terminal front-end, a native toolkit) translate
//! their own input into [`event::PointerEvent`] and [`event::ZoneSignal`]
//! values. The engine never sees host-specific types, so the same drag state
//! machine runs unchanged everywhere.

pub mod event;
pub mod geometry;

pub use event::{PointerButton, PointerEvent, PointerEventKind, ZoneSignal};
pub use geometry::{Offset, Point, Rect};
