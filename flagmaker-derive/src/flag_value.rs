//! Implementation of #[derive(FlagValue)] for newtypes

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

pub fn derive_flag_value_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // Validate: must be tuple struct with single field
    let inner_type = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "FlagValue requires a tuple struct with exactly one field: struct Port(u16)",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "FlagValue only works on tuple structs")
                .to_compile_error()
                .into();
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::flagmaker::Field for #name #ty_generics #where_clause {
            fn describe(walker: &mut ::flagmaker::Walker, member: ::flagmaker::Member) {
                <#inner_type as ::flagmaker::Field>::describe(walker, member)
            }

            fn bind<'__flag>(
                &'__flag mut self,
                binder: &mut ::flagmaker::Binder<'__flag>,
                member: ::flagmaker::Member,
            ) {
                ::flagmaker::Field::bind(&mut self.0, binder, member)
            }
        }
    };

    TokenStream::from(expanded)
}
