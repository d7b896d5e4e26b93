//! Field attribute parsing shared by the derives.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token};

/// What a field's attributes say about its flag.
#[derive(Default)]
pub struct FieldAttrs {
    /// `(attribute key, renamed segment)` pairs in declaration order.
    pub renames: Vec<(String, String)>,
    pub skip: bool,
    pub doc: String,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();
        let mut doc_lines = Vec::new();

        for attr in attrs {
            if attr.path().is_ident("doc") {
                if let Meta::NameValue(nv) = &attr.meta
                    && let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                {
                    let line = s.value().trim().to_string();
                    if !line.is_empty() {
                        doc_lines.push(line);
                    }
                }
                continue;
            }

            let Meta::List(_) = &attr.meta else {
                continue;
            };
            let Some(key) = attr.path().get_ident().map(|i| i.to_string()) else {
                continue;
            };

            if key == "flag" {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        let value: LitStr = meta.value()?.parse()?;
                        out.renames.push((key.clone(), value.value()));
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        out.skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown flag attribute, expected `rename` or `skip`"))
                    }
                })?;
            } else {
                // Foreign attributes (serde, yaml, ...) only contribute renames;
                // anything we cannot read is left to the derive that owns it.
                let _ = attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        out.renames.push((key.clone(), value.value()));
                        Ok(())
                    } else {
                        skip_meta(&meta)
                    }
                });
            }
        }

        out.doc = doc_lines.join(" ");
        Ok(out)
    }
}

fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}
