//! Display name generation for joining clients.

use super::value_object::DisplayName;

/// Source of display names for new clients.
///
/// No uniqueness guarantee is required from implementations.
pub trait NameGenerator: Send + Sync {
    fn generate(&self) -> DisplayName;
}
