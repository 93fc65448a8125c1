//! Macros for ergonomic state declarations.

/// Declare a unit enum usable as a registry key.
///
/// Derives the identifier traits (plus serde), implements
/// [`Enumerable`](crate::core::Enumerable) over every variant in
/// declaration order, and implements `Display` with the variant name.
///
/// # Example
///
/// ```
/// use hookstate::state_enum;
/// use hookstate::StateRegistry;
///
/// state_enum! {
///     pub enum Phase {
///         Idle,
///         Running,
///         Done,
///     }
/// }
///
/// let registry: StateRegistry<Phase> = StateRegistry::from_enum(Phase::Idle).unwrap();
/// assert_eq!(registry.len(), 3);
/// assert_eq!(Phase::Running.to_string(), "Running");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::core::Enumerable for $name {
            fn all() -> Vec<Self> {
                vec![$(Self::$variant),+]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => stringify!($variant)),+
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Enumerable;
    use crate::registry::StateRegistry;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_lists_variants() {
        assert_eq!(
            TestState::all(),
            vec![
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn state_enum_displays_variant_name() {
        assert_eq!(TestState::Processing.to_string(), "Processing");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        let _state = PublicState::A;
    }

    #[test]
    fn from_enum_registers_every_variant() {
        let registry: StateRegistry<TestState> =
            StateRegistry::from_enum(TestState::Processing).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.current(), &TestState::Processing);
        assert!(TestState::all().iter().all(|state| registry.contains(state)));
    }
}
