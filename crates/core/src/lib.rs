//! Domain logic for the Time4Work timesheet backend.
//!
//! Pure types and computations only -- no I/O. The daily/monthly hours
//! aggregation lives in [`aggregate`], the event model in [`event`], and
//! single-event mutations (add/edit/delete) in [`entries`].

pub mod aggregate;
pub mod entries;
pub mod error;
pub mod event;
pub mod keys;
pub mod roles;
pub mod time;
pub mod types;
