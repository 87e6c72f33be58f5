//! Typed record ids, so a food id can never be passed where a user id is
//! expected.

/// Declare an `i64` id newtype.
///
/// The id serializes as a bare number and displays as one, which is how it
/// appears in request paths and bodies.
///
/// ```rust
/// # use tanawal_core::define_id;
/// define_id!(ChefId);
///
/// assert_eq!(ChefId::new(7).to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

define_id!(UserId);
define_id!(FoodId);
define_id!(PurchaseId);
define_id!(DeliveryId);
define_id!(AddressId);
