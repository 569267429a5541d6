//! Pure interception logic for Plot Armor.
//!
//! This crate contains every decision Plot Armor makes, independent of any
//! engine or runtime. Functions take plain data and return results, making
//! them unit-testable and portable across host simulations.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`commands`] | Operator command grammar and tab-completion filtering |
//! | [`damage`] | Damage cause classification (closed enum) |
//! | [`geometry`] | Minimal 3D vector math |
//! | [`guard`] | Survival-floor verdict: allow, block, or save |
//! | [`knockback`] | Explosion launch vector recomputation |

pub mod commands;
pub mod damage;
pub mod geometry;
pub mod guard;
pub mod knockback;
