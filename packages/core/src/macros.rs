//! Declarative record definitions.

/// Declare a record type.
///
/// Expands to the struct itself plus [`Marshal`](crate::Marshal) and
/// [`RecordType`](crate::RecordType) impls. Field order is wire order. A
/// field may carry a different wire name with `as "name"`. Wire names must
/// be distinct; a clash is a compile error:
///
/// ```compile_fail
/// zomekit_core::record_type! {
///     struct Clash {
///         a: i32,
///         b as "a": i32,
///     }
/// }
/// ```
///
/// ```rust
/// use zomekit_core::{record_type, Marshal, RecordType};
///
/// record_type! {
///     /// A note.
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Note {
///         pub title: String,
///         pub body_text as "bodyText": String,
///         pub pinned: Option<bool>,
///     }
/// }
///
/// let schema = Note::record_schema();
/// assert_eq!(schema.name, "Note");
/// assert_eq!(schema.fields[1].name, "bodyText");
/// assert!(Note { title: "t".into(), body_text: "b".into(), pinned: None }
///     .to_value()
///     .conforms_to(&Note::schema()));
/// ```
#[macro_export]
macro_rules! record_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident $(as $wire:literal)? : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        const _: () = ::core::assert!(
            !$crate::__private::has_duplicate_names(&[
                $($crate::__field_name!($field $(, $wire)?)),*
            ]),
            "record_type! fields must have distinct wire names"
        );

        impl $crate::Marshal for $name {
            fn schema() -> $crate::Schema {
                $crate::Schema::Record(<Self as $crate::RecordType>::record_schema())
            }

            #[allow(unused_mut)]
            fn to_value(&self) -> $crate::Value {
                let mut fields = $crate::Fields::new();
                $(
                    fields.insert(
                        ::std::string::String::from($crate::__field_name!($field $(, $wire)?)),
                        $crate::Marshal::to_value(&self.$field),
                    );
                )*
                $crate::Value::Record(fields)
            }

            #[allow(unused_mut)]
            fn from_value(value: $crate::Value) -> ::std::result::Result<Self, $crate::DecodeError> {
                let mut fields = value.into_record(::core::stringify!($name))?;
                let record = $name {
                    $(
                        $field: <$fty as $crate::Marshal>::from_value(
                            $crate::__private::take_field(
                                &mut fields,
                                ::core::stringify!($name),
                                $crate::__field_name!($field $(, $wire)?),
                            )?,
                        )?,
                    )*
                };
                $crate::__private::finish_record(fields, ::core::stringify!($name))?;
                Ok(record)
            }
        }

        impl $crate::RecordType for $name {
            fn record_schema() -> &'static $crate::RecordSchema {
                $crate::__private::lazy_static! {
                    static ref SCHEMA: $crate::RecordSchema = $crate::RecordSchema::new(
                        ::core::stringify!($name),
                        ::std::vec![
                            $(
                                $crate::FieldSchema::new(
                                    $crate::__field_name!($field $(, $wire)?),
                                    <$fty as $crate::Marshal>::schema(),
                                ),
                            )*
                        ],
                    );
                }
                &SCHEMA
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
    ($field:ident) => {
        ::core::stringify!($field)
    };
    ($field:ident, $wire:literal) => {
        $wire
    };
}
