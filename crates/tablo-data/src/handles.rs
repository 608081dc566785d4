macro_rules! define_handle_type {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create a handle from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

define_handle_type!(
    VarHandle,
    "Opaque reference to a variable owned by a model sink."
);
define_handle_type!(
    ConstrHandle,
    "Opaque reference to a constraint owned by a model sink."
);
