//! Macros for ergonomic state machine construction.

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// The enum derives everything the machine needs (`Copy`, `Eq`, `Hash`,
/// `Ord`, `Debug`) and gains an `ALL` constant listing its variants in
/// declaration order.
///
/// # Example
///
/// ```
/// use actor_fsm::core::State;
/// use actor_fsm::state_enum;
///
/// state_enum! {
///     pub enum EnemyState {
///         Patrol,
///         Chase,
///         Attack,
///     }
/// }
///
/// assert_eq!(EnemyState::Chase.name(), "Chase");
/// assert_eq!(EnemyState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
