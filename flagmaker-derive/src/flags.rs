//! Implementation of #[derive(Flags)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Visibility, parse_macro_input};

use crate::attrs::FieldAttrs;

pub fn derive_flags_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Flags requires a struct with named fields",
                ));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Flags requires named fields; use FlagValue for newtypes: struct Port(u16)",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Flags only works on structs",
            ));
        }
    };

    let mut describe = Vec::new();
    let mut bind = Vec::new();

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let member_name = ident.unraw().to_string();
        let tags = attrs.renames.iter().map(|(key, value)| quote!((#key, #value)));
        let doc = &attrs.doc;
        let member = quote! {
            ::flagmaker::Member::new(#member_name, &[#(#tags),*], #doc)
        };

        if attrs.skip {
            describe.push(quote! { walker.unsupported(#member); });
            continue;
        }
        if matches!(field.vis, Visibility::Inherited) {
            describe.push(quote! { walker.private(#member); });
            continue;
        }

        let ty = &field.ty;
        describe.push(quote! { walker.field::<#ty>(#member); });
        bind.push(quote! { binder.field(#member, &mut self.#ident); });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::flagmaker::Flags for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn describe(walker: &mut ::flagmaker::Walker) {
                #(#describe)*
            }

            fn describe_value(&self, walker: &mut ::flagmaker::Walker) {
                <Self as ::flagmaker::Flags>::describe(walker)
            }

            #[allow(unused_variables)]
            fn bind<'__flag>(&'__flag mut self, binder: &mut ::flagmaker::Binder<'__flag>) {
                #(#bind)*
            }
        }

        impl #impl_generics ::flagmaker::Field for #name #ty_generics #where_clause {
            fn describe(walker: &mut ::flagmaker::Walker, member: ::flagmaker::Member) {
                walker.nested::<Self>(member)
            }

            fn bind<'__flag>(
                &'__flag mut self,
                binder: &mut ::flagmaker::Binder<'__flag>,
                member: ::flagmaker::Member,
            ) {
                binder.nested(member, self)
            }
        }
    })
}
