//! Macro utilitario para declarar esquemas sin boilerplate.
//!
//! Exportado en la raíz del crate:
//!   use pudding_core::typed_schema;

/// Declara un struct de esquema con derives y su impl de `Schema`.
///
/// ```ignore
/// typed_schema!(TextInput { text: String, source: Option<String> });
/// typed_schema!(CleanedText { text: String, changes_made: Vec<String> = default });
/// ```
///
/// El `NAME` del esquema es el nombre del struct. Atributos (`#[...]`) sobre el
/// struct o sobre cada campo se copian tal cual. Un campo marcado `= default`
/// no es requerido: si falta, toma `Default::default()`.
#[macro_export]
macro_rules! typed_schema {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$fmeta:meta])* $fname:ident : $fty:ty $(= $def:ident)? ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name { $( $(#[$fmeta])* $(#[serde($def)])? pub $fname: $fty, )+ }

        impl $crate::schema::Schema for $name {
            const NAME: &'static str = stringify!($name);

            fn fields() -> Vec<$crate::schema::FieldSpec> {
                vec![$( $crate::__schema_field!($fty, $fname $(, $def)?) ),+]
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __schema_field {
    ($fty:ty, $fname:ident) => {
        $crate::schema::FieldSpec::of::<$fty>(stringify!($fname))
    };
    ($fty:ty, $fname:ident, default) => {
        $crate::schema::FieldSpec::of::<$fty>(stringify!($fname)).optional()
    };
}
