//! Procedural macros for the Solbeet codec framework.
//!
//! This crate generates the composite codecs (structs and data enums) from
//! their member codecs at compile time. Nothing is interpreted at runtime: the
//! generated `write`/`read` bodies are straight-line calls into each field's
//! own codec.
//!
//! # Available Macros
//!
//! | Macro | Type | Purpose |
//! |-------|------|---------|
//! | [`Beet`] | Derive | Struct or data-enum codec, size, field/variant metadata, `Describe` |
//!
//! # Generated Code
//!
//! ## On structs (named, tuple or unit)
//!
//! - `FixableSize` - sum of the field sizes, no encoding performed
//! - `Beet` - fields written/read in declaration order; `FIXED_SIZE` is the
//!   sum of the field sizes when every field is fixed, `None` otherwise
//! - `BeetStruct` - field names and per-field fixed sizes
//! - `Describe` - a `Pretty::Record` keyed by field name
//!
//! ## On enums
//!
//! - `Beet` - one `u8` discriminant (the variant's declaration index) followed
//!   by the variant's fields; fixed with size 1 only when no variant has fields
//! - `DataEnum` - variant names and `discriminant()`
//! - `Describe` - `Pretty::Symbol("Type.Variant")` for unit variants,
//!   `Pretty::Variant` otherwise
//!
//! # Compile Errors
//!
//! - unions
//! - enums without variants or with more than 256 variants
//! - explicit discriminants (`Variant = 3`): the wire discriminant is always
//!   the declaration index

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, Data, DataEnum, DeriveInput, Fields, Generics, Ident, Member, Type};

/// Derive a Solbeet codec for a struct or an enum.
///
/// # Example
///
/// ```ignore
/// use solbeet::Beet;
///
/// #[derive(Beet, Clone, Debug, PartialEq)]
/// pub struct CrashInput {
///     pub target_multiplier: u64,
///     pub wager: u64,
/// }
///
/// #[derive(Beet, Clone, Debug, PartialEq)]
/// pub enum BetInput {
///     CoinFlip { input: CoinFlipInput },
///     Crash { input: CrashInput },
/// }
///
/// assert_eq!(<CrashInput as Beet>::FIXED_SIZE, Some(16));
/// assert_eq!(<BetInput as Beet>::FIXED_SIZE, None);
/// ```
///
/// Generated code refers to the runtime crate as `::solbeet`.
#[proc_macro_derive(Beet)]
pub fn derive_beet(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data) => expand_struct(&input, &data.fields),
        Data::Enum(data) => expand_enum(&input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Beet cannot be derived for unions",
        )),
    };

    expanded.unwrap_or_else(syn::Error::into_compile_error).into()
}

/// One field of a struct or enum variant.
struct FieldInfo {
    /// `self.<member>` for struct fields.
    member: Member,
    /// Local the field is bound to while reading or matching.
    binding: Ident,
    /// Display name: the identifier, or the index for tuple fields.
    name: String,
    ty: Type,
}

fn collect_fields(fields: &Fields) -> Vec<FieldInfo> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let (member, name) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
                None => (Member::Unnamed(i.into()), i.to_string()),
            };
            FieldInfo {
                member,
                binding: format_ident!("__f{}", i),
                name,
                ty: field.ty.clone(),
            }
        })
        .collect()
}

/// `Path { a: __f0, b: __f1 }`, `Path(__f0, __f1)` or `Path`, usable both as
/// a pattern and as a constructor.
fn shape(path: TokenStream2, fields: &Fields, infos: &[FieldInfo]) -> TokenStream2 {
    let bindings = infos.iter().map(|f| &f.binding);
    match fields {
        Fields::Named(_) => {
            let members = infos.iter().map(|f| &f.member);
            quote! { #path { #(#members: #bindings),* } }
        }
        Fields::Unnamed(_) => quote! { #path ( #(#bindings),* ) },
        Fields::Unit => path,
    }
}

/// Add codec bounds for every type parameter.
fn add_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::solbeet::Beet + ::solbeet::Describe));
    }
    generics
}

fn describe_fields(infos: &[FieldInfo], access: impl Fn(&FieldInfo) -> TokenStream2) -> TokenStream2 {
    let entries = infos.iter().map(|f| {
        let name = &f.name;
        let value = access(f);
        quote! { (#name, ::solbeet::Describe::describe(#value)) }
    });
    quote! { ::std::vec![#(#entries),*] }
}

fn expand_struct(input: &DeriveInput, fields: &Fields) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.to_string();
    let generics = add_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let infos = collect_fields(fields);
    let members: Vec<_> = infos.iter().map(|f| &f.member).collect();
    let bindings: Vec<_> = infos.iter().map(|f| &f.binding).collect();
    let types: Vec<_> = infos.iter().map(|f| &f.ty).collect();
    let names: Vec<_> = infos.iter().map(|f| f.name.as_str()).collect();
    let construct = shape(quote!(Self), fields, &infos);

    let describe = match fields {
        Fields::Unit => quote! { ::solbeet::Pretty::Symbol(::std::string::String::from(#name_str)) },
        _ => {
            let entries = describe_fields(&infos, |f| {
                let member = &f.member;
                quote! { &self.#member }
            });
            quote! { ::solbeet::Pretty::Record(#entries) }
        }
    };

    Ok(quote! {
        impl #impl_generics ::solbeet::FixableSize for #name #ty_generics #where_clause {
            #[inline]
            fn byte_size(&self) -> usize {
                0 #(+ ::solbeet::FixableSize::byte_size(&self.#members))*
            }
        }

        impl #impl_generics ::solbeet::Beet for #name #ty_generics #where_clause {
            const FIXED_SIZE: ::core::option::Option<usize> =
                ::solbeet::sum_fixed_sizes(&[#(<#types as ::solbeet::Beet>::FIXED_SIZE),*]);
            const TYPE_NAME: &'static str = #name_str;

            #[allow(unused_variables)]
            fn write(&self, buf: &mut [u8], offset: usize) -> ::solbeet::Result<usize> {
                let __offset = offset;
                #(let __offset = ::solbeet::Beet::write(&self.#members, buf, __offset)?;)*
                ::core::result::Result::Ok(__offset)
            }

            #[allow(unused_variables)]
            fn read(buf: &[u8], offset: usize) -> ::solbeet::Result<(Self, usize)> {
                let __offset = offset;
                #(let (#bindings, __offset) = <#types as ::solbeet::Beet>::read(buf, __offset)?;)*
                ::core::result::Result::Ok((#construct, __offset))
            }
        }

        impl #impl_generics ::solbeet::BeetStruct for #name #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#names),*];
            const FIELD_SIZES: &'static [::core::option::Option<usize>] =
                &[#(<#types as ::solbeet::Beet>::FIXED_SIZE),*];
        }

        impl #impl_generics ::solbeet::Describe for #name #ty_generics #where_clause {
            fn describe(&self) -> ::solbeet::Pretty {
                #describe
            }
        }
    })
}

fn expand_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.to_string();
    let generics = add_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(name, "Beet requires at least one enum variant"));
    }
    if data.variants.len() > 256 {
        return Err(syn::Error::new_spanned(
            name,
            "Beet enums are limited to 256 variants (one-byte discriminant)",
        ));
    }
    if let Some(variant) = data.variants.iter().find(|v| v.discriminant.is_some()) {
        return Err(syn::Error::new_spanned(
            variant,
            "Beet discriminants are the declaration index; remove the explicit `= N`",
        ));
    }

    let all_unit = data.variants.iter().all(|v| matches!(v.fields, Fields::Unit));
    let fixed_size = if all_unit {
        quote! { ::core::option::Option::Some(1) }
    } else {
        quote! { ::core::option::Option::None }
    };

    let mut size_arms = Vec::new();
    let mut write_arms = Vec::new();
    let mut read_arms = Vec::new();
    let mut discriminant_arms = Vec::new();
    let mut describe_arms = Vec::new();
    let mut variant_names = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        let ident = &variant.ident;
        let tag = index as u8;
        let infos = collect_fields(&variant.fields);
        let bindings: Vec<_> = infos.iter().map(|f| &f.binding).collect();
        let types: Vec<_> = infos.iter().map(|f| &f.ty).collect();
        let pattern = shape(quote!(Self::#ident), &variant.fields, &infos);
        let kind = format!("{}.{}", name_str, ident);
        variant_names.push(ident.to_string());

        size_arms.push(quote! {
            #pattern => 1 #(+ ::solbeet::FixableSize::byte_size(#bindings))*,
        });

        write_arms.push(quote! {
            #pattern => {
                let __offset = ::solbeet::put(buf, offset, &[#tag], #name_str)?;
                #(let __offset = ::solbeet::Beet::write(#bindings, buf, __offset)?;)*
                ::core::result::Result::Ok(__offset)
            }
        });

        read_arms.push(quote! {
            #tag => {
                #(let (#bindings, __offset) = <#types as ::solbeet::Beet>::read(buf, __offset)?;)*
                ::core::result::Result::Ok((#pattern, __offset))
            }
        });

        let wildcard = match &variant.fields {
            Fields::Named(_) => quote! { Self::#ident { .. } },
            Fields::Unnamed(_) => quote! { Self::#ident(..) },
            Fields::Unit => quote! { Self::#ident },
        };
        discriminant_arms.push(quote! { #wildcard => #tag, });

        let describe = match &variant.fields {
            Fields::Unit => quote! { ::solbeet::Pretty::Symbol(::std::string::String::from(#kind)) },
            _ => {
                let entries = describe_fields(&infos, |f| {
                    let binding = &f.binding;
                    quote! { #binding }
                });
                quote! {
                    ::solbeet::Pretty::Variant {
                        kind: ::std::string::String::from(#kind),
                        fields: #entries,
                    }
                }
            }
        };
        describe_arms.push(quote! { #pattern => #describe, });
    }

    Ok(quote! {
        impl #impl_generics ::solbeet::FixableSize for #name #ty_generics #where_clause {
            #[inline]
            fn byte_size(&self) -> usize {
                match self {
                    #(#size_arms)*
                }
            }
        }

        impl #impl_generics ::solbeet::Beet for #name #ty_generics #where_clause {
            const FIXED_SIZE: ::core::option::Option<usize> = #fixed_size;
            const TYPE_NAME: &'static str = #name_str;

            fn write(&self, buf: &mut [u8], offset: usize) -> ::solbeet::Result<usize> {
                match self {
                    #(#write_arms)*
                }
            }

            fn read(buf: &[u8], offset: usize) -> ::solbeet::Result<(Self, usize)> {
                let __tag = ::solbeet::take(buf, offset, 1, #name_str)?[0];
                let __offset = offset + 1;
                match __tag {
                    #(#read_arms)*
                    #[allow(unreachable_patterns)]
                    _ => ::core::result::Result::Err(::solbeet::CodecError::UnknownVariant {
                        type_name: #name_str,
                        discriminant: __tag,
                        offset,
                    }),
                }
            }
        }

        impl #impl_generics ::solbeet::DataEnum for #name #ty_generics #where_clause {
            const VARIANTS: &'static [&'static str] = &[#(#variant_names),*];

            #[inline]
            fn discriminant(&self) -> u8 {
                match self {
                    #(#discriminant_arms)*
                }
            }
        }

        impl #impl_generics ::solbeet::Describe for #name #ty_generics #where_clause {
            fn describe(&self) -> ::solbeet::Pretty {
                match self {
                    #(#describe_arms)*
                }
            }
        }
    })
}
