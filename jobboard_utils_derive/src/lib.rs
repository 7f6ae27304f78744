use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Instruments a service or repository method.
///
/// Expands to [`tracing::instrument`] with the return value recorded at trace
/// level and emits a `call` trace event when the function is entered. Any
/// arguments passed to the attribute (e.g. `skip(self, txn)`) are forwarded to
/// `tracing::instrument`.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let name = sig.ident.to_string();

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!(function = #name, "call");
            #block
        }
    }
    .into()
}
