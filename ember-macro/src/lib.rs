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

//! Ember Macro Library
//!
//! Procedural macros for declaring Ember actor state.
//!
//! # Managed state
//!
//! [`ManagedState`] derives the snapshot contract from an explicit list of
//! managed fields. Only fields marked `#[managed]` take part; fields holding
//! other managed-state types are marked `#[managed(nested)]` and are captured
//! through their own contract.
//!
//! ```ignore
//! #[derive(Default, Debug, ManagedState)]
//! pub struct Accumulator {
//!     #[managed]
//!     total: i64,
//!     #[managed(nested)]
//!     stats: Stats,
//!     handle: Option<CapabilityHandle>,
//! }
//! ```
//!
//! # Actor macro
//!
//! [`ember_actor`] adds the derives every actor type needs:
//!
//! ```ignore
//! #[ember_actor]
//! pub struct Doubler {
//!     #[managed]
//!     fired: u64,
//! }
//! ```

use proc_macro::TokenStream;

use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.segments.last().is_some_and(|segment| segment.ident == trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

/// How a field takes part in the managed state.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Managed {
    Plain,
    Nested,
}

fn managed_kind(field: &syn::Field) -> syn::Result<Option<Managed>> {
    let mut kind = None;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("managed")) {
        if kind.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[managed] attribute"));
        }
        match &attr.meta {
            syn::Meta::Path(_) => kind = Some(Managed::Plain),
            syn::Meta::List(_) => {
                let mut nested = false;
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("nested") {
                        nested = true;
                        Ok(())
                    } else {
                        Err(meta.error("expected `nested`"))
                    }
                })?;
                kind = Some(if nested { Managed::Nested } else { Managed::Plain });
            }
            syn::Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(attr, "expected #[managed] or #[managed(nested)]"));
            }
        }
    }
    Ok(kind)
}

/// Derives `ManagedState` from the fields marked `#[managed]`.
///
/// Plain managed fields must implement `serde::Serialize` and
/// `serde::de::DeserializeOwned`. Nested fields must implement `ManagedState`
/// and `Default`. Restoring decodes every field before assigning any, so a
/// failed restore leaves the value untouched.
#[proc_macro_derive(ManagedState, attributes(managed))]
pub fn derive_managed_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_managed_state(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_managed_state(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(unit_state(input));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    input.span(),
                    "ManagedState requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "ManagedState can only be derived for structs",
            ));
        }
    };

    let mut field_names = Vec::new();
    let mut encode = Vec::new();
    let mut decode = Vec::new();
    let mut assign = Vec::new();
    for field in fields {
        let Some(kind) = managed_kind(field)? else {
            continue;
        };
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let key = ident.to_string();
        let local = syn::Ident::new(&format!("__managed_{ident}"), ident.span());

        let encoded = match kind {
            Managed::Plain => quote! {
                ::ember_reactive::snapshot::encode_field(#key, &self.#ident)?
            },
            Managed::Nested => quote! {
                ::ember_reactive::snapshot::encode_nested(&self.#ident)?
            },
        };
        let decoded = match kind {
            Managed::Plain => quote! {
                ::ember_reactive::snapshot::decode_field(#key, __value)?
            },
            Managed::Nested => quote! {
                ::ember_reactive::snapshot::decode_nested(__value)?
            },
        };

        field_names.push(key.clone());
        encode.push(quote! {
            __state.insert(#key.to_string(), #encoded);
        });
        decode.push(quote! {
            let #local = {
                let __value = ::ember_reactive::snapshot::take_field(#type_name, &mut __state, #key)?;
                #decoded
            };
        });
        assign.push(quote! {
            self.#ident = #local;
        });
    }

    Ok(quote! {
        impl #impl_generics ::ember_reactive::traits::ManagedState for #name #ty_generics #where_clause {
            fn managed_fields() -> &'static [&'static str] {
                &[#(#field_names),*]
            }

            fn state(&self) -> ::std::result::Result<::ember_reactive::Value, ::ember_reactive::SnapshotError> {
                let mut __state = ::ember_reactive::snapshot::Map::new();
                #(#encode)*
                ::std::result::Result::Ok(::ember_reactive::Value::Object(__state))
            }

            fn set_state(
                &mut self,
                state: ::ember_reactive::Value,
            ) -> ::std::result::Result<(), ::ember_reactive::SnapshotError> {
                let mut __state = ::ember_reactive::snapshot::into_object(#type_name, state)?;
                #(#decode)*
                ::ember_reactive::snapshot::finish(#type_name, __state)?;
                #(#assign)*
                ::std::result::Result::Ok(())
            }
        }
    })
}

fn unit_state(input: &DeriveInput) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::ember_reactive::traits::ManagedState for #name #ty_generics #where_clause {
            fn managed_fields() -> &'static [&'static str] {
                &[]
            }

            fn state(&self) -> ::std::result::Result<::ember_reactive::Value, ::ember_reactive::SnapshotError> {
                ::std::result::Result::Ok(::ember_reactive::Value::Object(::ember_reactive::snapshot::Map::new()))
            }

            fn set_state(
                &mut self,
                state: ::ember_reactive::Value,
            ) -> ::std::result::Result<(), ::ember_reactive::SnapshotError> {
                let __state = ::ember_reactive::snapshot::into_object(#type_name, state)?;
                ::ember_reactive::snapshot::finish(#type_name, __state)
            }
        }
    }
}

/// Configuration options parsed from `#[ember_actor(...)]` attributes.
#[derive(Default)]
struct ActorConfig {
    /// Skip deriving Default (user will implement it manually).
    no_default: bool,
}

impl ActorConfig {
    fn parse(attr: &TokenStream) -> Self {
        let mut config = Self::default();
        let attr_string = attr.to_string();
        for part in attr_string.split(',') {
            if part.trim() == "no_default" {
                config.no_default = true;
            }
        }
        config
    }
}

/// Adds the derives an actor type needs: `Default`, `Debug` and `ManagedState`.
///
/// Derives already present on the type are not repeated. Use
/// `#[ember_actor(no_default)]` when `Default` is implemented by hand.
#[proc_macro_attribute]
pub fn ember_actor(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = ActorConfig::parse(&attr);
    let input = parse_macro_input!(item as DeriveInput);

    let mut traits = Vec::new();
    if !config.no_default && !has_derive(&input, "Default") {
        traits.push(quote! { Default });
    }
    if !has_derive(&input, "Debug") {
        traits.push(quote! { Debug });
    }
    if !has_derive(&input, "ManagedState") {
        traits.push(quote! { ::ember_reactive::ManagedState });
    }

    let derives = if traits.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#traits),*)] }
    };

    let expanded = quote! {
        #derives
        #input
    };
    expanded.into()
}
