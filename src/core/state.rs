//! State identifier traits.
//!
//! A registry is keyed by any value that can be cloned, compared for
//! equality, hashed, and printed for diagnostics. Strings, integers and
//! unit enums all qualify without extra work.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for values usable as state identifiers.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type, so
/// callers never implement it by hand.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into history records
/// - `Eq` + `Hash`: identifiers are registry keys
/// - `Debug`: identifiers appear in logs and error messages
///
/// # Example
///
/// ```rust
/// use hookstate::core::StateId;
///
/// fn assert_state_id<S: StateId>(_: &S) {}
///
/// assert_state_id(&"Idle".to_string());
/// assert_state_id(&"Idle");
/// assert_state_id(&42u32);
/// ```
pub trait StateId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> StateId for T {}

/// A closed set of state identifiers that can list all of its values.
///
/// Implemented by the [`state_enum!`](crate::state_enum) macro, and used by
/// [`StateRegistry::from_enum`](crate::registry::StateRegistry::from_enum)
/// to register every variant at once.
///
/// # Example
///
/// ```rust
/// use hookstate::core::Enumerable;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl Enumerable for Light {
///     fn all() -> Vec<Self> {
///         vec![Light::Red, Light::Green]
///     }
/// }
///
/// assert_eq!(Light::all().len(), 2);
/// ```
pub trait Enumerable: StateId + Sized {
    /// Every value of the type, in declaration order.
    fn all() -> Vec<Self>;
}
