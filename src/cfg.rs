#[doc(hidden)]
#[macro_export]
macro_rules! cfg_serde {
    ($($item:item)*) => {
        $( #[cfg(feature = "serde")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_json {
    ($($item:item)*) => {
        $( #[cfg(feature = "json")] $item )*
    }
}
