use proc_macro2::TokenStream;
use quote::quote;

/// Determines what crate name should be used to refer to `kinetic`.
/// crate::... or kinetic::... depending.
pub fn kinetic_crate_path() -> TokenStream {
    let is_internal = std::env::var("CARGO_CRATE_NAME")
        .map(|pkg_name| pkg_name == "kinetic")
        .unwrap_or_default();

    #[cfg(doctest)]
    let is_internal = false;

    match is_internal {
        true => quote!(crate),
        false => quote!(kinetic),
    }
}
