/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Marks a synchronous test that runs inside an `ember_test` tracing span.
///
/// Panics raised by the test body are logged through `tracing` with their
/// location before being re-raised, so they appear next to the firing logs
/// leading up to them. The test may return `()` or any `Result` accepted by
/// `#[test]`.
#[proc_macro_attribute]
pub fn ember_test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let vis = &input.vis;
    let sig = &input.sig;
    let body = &input.block;
    let attrs = &input.attrs;
    let name = &sig.ident;
    let output = &sig.output;

    if let Some(asyncness) = &sig.asyncness {
        return syn::Error::new_spanned(asyncness, "ember_test functions must be synchronous")
            .to_compile_error()
            .into();
    }
    if !sig.inputs.is_empty() {
        return syn::Error::new_spanned(&sig.inputs, "ember_test functions take no arguments")
            .to_compile_error()
            .into();
    }

    let inner_name = syn::Ident::new(&format!("__{name}_body"), name.span());

    let output = quote! {
        #[test]
        #(#attrs)*
        #vis fn #name() #output {
            ::ember_test::initialize_tracing();
            ::ember_test::install_panic_logging();

            let test_span = ::ember_test::tracing::info_span!("ember_test", name = stringify!(#name));
            let _enter = test_span.enter();

            #inner_name()
        }

        fn #inner_name() #output #body
    };

    output.into()
}
