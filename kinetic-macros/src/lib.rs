//! Defines Kinetic Runtime macros.

#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

extern crate proc_macro;

use proc_macro::TokenStream;

mod helpers;
mod runtime_macro;

/// Macro definition for Kinetic Runtime.
///
/// This macro should be used once only in a project.
///
/// _Runs the entire function inside a tokio runtime and waits, before returning, for every task
/// subsequently and dynamically spawned through `task::run` (animation frames included)._
///
/// # Example
/// ```
/// #[kinetic::runtime]
/// async fn main() {
///     // whatever
/// }
/// ```
#[proc_macro_attribute]
pub fn runtime(_: TokenStream, item: TokenStream) -> TokenStream {
    runtime_macro::runtime_macro(item, false)
}

/// Same as `#[kinetic::runtime]` but for tests.
#[proc_macro_attribute]
pub fn test(_: TokenStream, item: TokenStream) -> TokenStream {
    runtime_macro::runtime_macro(item, true)
}
