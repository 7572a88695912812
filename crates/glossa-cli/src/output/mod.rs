//! Terminal and diagnostic output helpers.

mod diagnostic;
pub mod table;

pub use diagnostic::{CollisionDiagnostic, ReferenceDiagnostic, ResourceDiagnostic};
