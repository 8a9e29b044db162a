//! Generates `thiserror` enums for driven-port failures.
//!
//! Every variant gets a snake-case constructor. Struct variants take
//! `impl Into<_>` for each field so adapters can pass `&str` or `String`;
//! unit variants take no arguments.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleStoreError {
            Unreachable { message: String } => "store unreachable: {message}",
            Conflict => "row already exists",
            Capacity { used: u32, limit: u32 } => "capacity {used}/{limit}",
        }
    }

    #[test]
    fn struct_variants_accept_borrowed_strings() {
        let err = SampleStoreError::unreachable("pool timed out");
        assert_eq!(err.to_string(), "store unreachable: pool timed out");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SampleStoreError::conflict(), SampleStoreError::Conflict);
        assert_eq!(SampleStoreError::Conflict.to_string(), "row already exists");
    }

    #[test]
    fn numeric_fields_keep_their_types() {
        let err = SampleStoreError::capacity(9_u32, 10_u32);
        assert_eq!(err.to_string(), "capacity 9/10");
    }
}
