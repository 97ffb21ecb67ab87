//! Procedural macros shared by the identigen test suites.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Ident, ItemFn, LitStr};

/// Levels accepted by [`macro@test_traced`].
const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Run a function as a `#[test]` with a `tracing` subscriber installed for its duration.
///
/// The subscriber writes through the test harness (so output is captured unless the test fails)
/// and filters at `DEBUG` unless another level is supplied.
///
/// ```ignore
/// use identigen_macros::test_traced;
///
/// #[test_traced("INFO")]
/// fn test_encoding() {
///     tracing::info!("visible");
///     tracing::debug!("filtered");
/// }
/// ```
///
/// The body may return a value (e.g. `Result<(), E>`); it is passed through unchanged.
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let level = if attr.is_empty() {
        String::from("DEBUG")
    } else {
        let literal = parse_macro_input!(attr as LitStr);
        let level = literal.value().trim().to_ascii_uppercase();
        if !LEVELS.contains(&level.as_str()) {
            return syn::Error::new(
                literal.span(),
                format!("unknown level `{}`; expected one of {:?}", literal.value(), LEVELS),
            )
            .to_compile_error()
            .into();
        }
        level
    };
    let level = Ident::new(&level, Span::call_site());

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block)
        }
    };
    TokenStream::from(expanded)
}
